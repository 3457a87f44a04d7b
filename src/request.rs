use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::dataset::errors::DatasetError;
use crate::dataset::{self, Dataset, LoadOptions, LoadReport};
use crate::detector::cache::{Fingerprint, Operation, RequestCache};
use crate::detector::{self, AnalysisView};
use crate::settings::Settings;

/// A user-supplied file: its name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &str) -> Result<Self, DatasetError> {
        let bytes = fs::read(path)
            .map_err(|e| DatasetError::ParseError(format!("failed to read file {}: {}", path, e)))?;
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        Ok(Self { name, bytes })
    }
}

/// One invocation: a single upload, the settings it runs under and the
/// results already computed for it.
#[derive(Debug)]
pub struct Request {
    upload: Upload,
    fingerprint: Fingerprint,
    settings: Settings,
    cache: RequestCache,
    report: Option<LoadReport>,
}

impl Request {
    pub fn new(upload: Option<Upload>, settings: Settings) -> Result<Self, DatasetError> {
        let upload = upload.ok_or(DatasetError::EmptyInputError)?;
        let fingerprint = Fingerprint::of(&upload.bytes);
        Ok(Self {
            upload,
            fingerprint,
            settings,
            cache: RequestCache::new(),
            report: None,
        })
    }

    pub fn upload(&self) -> &Upload {
        &self.upload
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// Populated once the upload has been loaded.
    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    pub fn dataset(&mut self) -> Result<Rc<Dataset>, DatasetError> {
        let delimiter = self
            .settings
            .delimiter_byte()
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;
        let options = LoadOptions {
            file_name: &self.upload.name,
            key: &self.settings.key,
            sheet: self.settings.sheet.as_deref(),
            delimiter,
        };
        let raw = &self.upload.bytes;
        let report = &mut self.report;

        self.cache
            .get_or_try_insert_with(&self.fingerprint, Operation::Load, || {
                let (dataset, load_report) = dataset::load_with_report(raw, &options)?;
                *report = Some(load_report);
                Ok(dataset)
            })
    }

    pub fn grouped(&mut self) -> Result<Rc<Dataset>, DatasetError> {
        let base = self.dataset()?;
        let key = &self.settings.key;
        self.cache
            .get_or_try_insert_with(&self.fingerprint, Operation::Group, || {
                detector::group_by_key_stable(&base, key)
            })
    }

    pub fn annotated(&mut self) -> Result<Rc<Dataset>, DatasetError> {
        let base = self.dataset()?;
        let key = &self.settings.key;
        self.cache
            .get_or_try_insert_with(&self.fingerprint, Operation::Annotate, || {
                detector::annotate(&base, key)
            })
    }

    pub fn duplicates_only(&mut self) -> Result<Rc<Dataset>, DatasetError> {
        let base = self.dataset()?;
        let key = &self.settings.key;
        self.cache
            .get_or_try_insert_with(&self.fingerprint, Operation::DuplicatesOnly, || {
                detector::extract_duplicates_only(&base, key)
            })
    }

    /// Flags in the loaded (ungrouped) row order.
    pub fn flags(&mut self) -> Result<Vec<bool>, DatasetError> {
        let base = self.dataset()?;
        detector::flag_duplicates(&base, &self.settings.key)
    }

    pub fn analysis_view(&mut self) -> Result<AnalysisView, DatasetError> {
        let base = self.dataset()?;
        detector::analysis_view(&base, &self.settings.key)
    }
}
