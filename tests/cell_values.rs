use matdup::dataset::value::is_missing_text;
use matdup::dataset::{CellKey, CellValue};

#[test]
fn text_cells_are_typed_per_cell() {
    assert_eq!(CellValue::from_text("42"), Some(CellValue::Int(42)));
    assert_eq!(CellValue::from_text("-4.5"), Some(CellValue::Float(-4.5)));
    assert_eq!(CellValue::from_text("MAT-42"), Some(CellValue::from("MAT-42")));
    assert_eq!(CellValue::from_text("inf"), Some(CellValue::from("inf")));
}

#[test]
fn integers_wider_than_i64_keep_their_digits() {
    assert_eq!(
        CellValue::from_text("9223372036854775807"),
        Some(CellValue::Int(i64::MAX))
    );
    assert_eq!(
        CellValue::from_text("9223372036854775808"),
        Some(CellValue::from("9223372036854775808"))
    );
    assert_eq!(
        CellValue::from_text("-12345678901234567890"),
        Some(CellValue::from("-12345678901234567890"))
    );
    assert_ne!(
        CellValue::from_text("12345678901234567890").map(|v| v.to_string()),
        CellValue::from_text("12345678901234567891").map(|v| v.to_string())
    );
    // exponent and fraction forms still read as floats
    assert_eq!(CellValue::from_text("1e3"), Some(CellValue::Float(1000.0)));
    assert_eq!(CellValue::from_text("+7"), Some(CellValue::Int(7)));
}

#[test]
fn na_tokens_and_blanks_are_missing() {
    for token in ["", "   ", "NA", "N/A", "#N/A", "null", "NULL", "NaN", "None", "<NA>"] {
        assert!(is_missing_text(token), "token {token:?}");
        assert_eq!(CellValue::from_text(token), None, "token {token:?}");
    }
    // matching is exact, like the default NA list it mirrors
    assert!(CellValue::from_text("na").is_some());
    assert!(CellValue::from_text(" NA").is_some());
}

#[test]
fn integral_floats_share_the_integer_key() {
    assert_eq!(CellValue::Float(1000.0).key(), CellValue::Int(1000).key());
    assert_eq!(CellValue::Float(-0.0).key(), CellValue::Int(0).key());
    assert_ne!(CellValue::Float(1000.5).key(), CellValue::Int(1000).key());
    assert_ne!(CellValue::from("1000").key(), CellValue::Int(1000).key());
}

#[test]
fn keys_order_bools_then_numbers_then_text() {
    let mut keys = vec![
        CellKey::Text("B"),
        CellKey::Int(10),
        CellKey::Float(2.5f64.to_bits()),
        CellKey::Bool(true),
        CellKey::Text("A"),
        CellKey::Int(-3),
        CellKey::Bool(false),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            CellKey::Bool(false),
            CellKey::Bool(true),
            CellKey::Int(-3),
            CellKey::Float(2.5f64.to_bits()),
            CellKey::Int(10),
            CellKey::Text("A"),
            CellKey::Text("B"),
        ]
    );
}

#[test]
fn display_matches_export_conventions() {
    assert_eq!(CellValue::Float(3.0).to_string(), "3.0");
    assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
    assert_eq!(CellValue::Bool(true).to_string(), "True");
    assert_eq!(CellValue::Bool(false).to_string(), "False");
    assert_eq!(CellValue::Int(-7).to_string(), "-7");
}
