use std::rc::Rc;

use matdup::dataset::MATERIAL_NUMBER;
use matdup::detector::cache::{Fingerprint, Operation, RequestCache};
use matdup::detector::group_by_key_stable;
use matdup::settings::Settings;

mod common;

#[test]
fn fingerprint_depends_only_on_content() {
    let a = Fingerprint::of(b"Material Number\nA\n");
    let b = Fingerprint::of(b"Material Number\nA\n");
    let c = Fingerprint::of(b"Material Number\nB\n");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.as_str().len(), 64);
}

#[test]
fn request_reuses_computed_datasets() {
    let mut request = common::csv_request("parts.csv", common::SCENARIO_CSV, Settings::default());

    let first = request.grouped().expect("grouped");
    assert_eq!(request.cache().len(), 2);
    assert_eq!(request.cache().hits(), 0);

    let second = request.grouped().expect("grouped");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(request.cache().hits(), 2);

    request.duplicates_only().expect("dups");
    request.annotated().expect("annotated");
    assert_eq!(request.cache().len(), 4);

    let report = request.report().expect("loaded");
    assert_eq!(report.rows_read, 5);
}

#[test]
fn request_results_match_the_pure_functions() {
    let mut request = common::csv_request("parts.csv", common::SCENARIO_CSV, Settings::default());
    let base = request.dataset().expect("loaded");

    let grouped = request.grouped().expect("grouped");
    assert_eq!(
        *grouped,
        group_by_key_stable(&base, MATERIAL_NUMBER).expect("grouped")
    );
    assert_eq!(
        request.flags().expect("flags"),
        vec![true, true, true, false, true]
    );
}

#[test]
fn caches_are_not_shared_between_requests() {
    let mut first = common::csv_request("parts.csv", common::SCENARIO_CSV, Settings::default());
    let mut second = common::csv_request("parts.csv", common::SCENARIO_CSV, Settings::default());
    assert_eq!(first.fingerprint(), second.fingerprint());

    let a = first.dataset().expect("loaded");
    let b = second.dataset().expect("loaded");
    assert_eq!(a, b);
    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(second.cache().hits(), 0);
}

#[test]
fn failed_computations_are_not_cached() {
    let mut request = common::csv_request("parts.csv", "Part,Qty\nA,1\n", Settings::default());
    assert!(request.dataset().is_err());
    assert!(request.cache().is_empty());
    assert!(request.report().is_none());
}

#[test]
fn cache_keys_include_the_operation() {
    let data = common::scenario();
    let fp = Fingerprint::of(common::SCENARIO_CSV.as_bytes());
    let mut cache = RequestCache::new();

    let loaded = cache
        .get_or_try_insert_with(&fp, Operation::Load, || Ok(data.clone()))
        .expect("load");
    let grouped = cache
        .get_or_try_insert_with(&fp, Operation::Group, || {
            group_by_key_stable(&loaded, MATERIAL_NUMBER)
        })
        .expect("group");

    assert_ne!(*loaded, *grouped);
    assert_eq!(cache.len(), 2);
    assert_eq!(Operation::Group.name(), "group_by_key_stable");
}
