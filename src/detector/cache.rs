use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::rc::Rc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::dataset::Dataset;
use crate::dataset::errors::DatasetError;

/// SHA-256 of the uploaded bytes, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Group,
    Annotate,
    DuplicatesOnly,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Group => "group_by_key_stable",
            Operation::Annotate => "annotate",
            Operation::DuplicatesOnly => "extract_duplicates_only",
        }
    }
}

/// Results computed during one request. Owned by that request and dropped
/// with it; there is no process-wide cache.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: HashMap<(Fingerprint, Operation), Rc<Dataset>>,
    hits: usize,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_try_insert_with<F>(
        &mut self,
        fingerprint: &Fingerprint,
        operation: Operation,
        compute: F,
    ) -> Result<Rc<Dataset>, DatasetError>
    where
        F: FnOnce() -> Result<Dataset, DatasetError>,
    {
        match self.entries.entry((fingerprint.clone(), operation)) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                debug!(operation = operation.name(), "request cache hit");
                Ok(Rc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                debug!(operation = operation.name(), "request cache miss");
                let dataset = Rc::new(compute()?);
                Ok(Rc::clone(entry.insert(dataset)))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}
