use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::LoadReport;
use crate::detector::KeySummary;

#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub file_name: String,
    pub key: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub distinct_keys: usize,
    pub duplicated_keys: usize,
    pub duplicate_rows: usize,
    pub records_written: Vec<PathBuf>,
    pub cache_hits: usize,
    pub total_duration: Duration,
}

impl ScanStats {
    pub fn new(file_name: &str, key: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn record_load(&mut self, report: &LoadReport) {
        self.rows_read = report.rows_read;
        self.rows_dropped = report.rows_dropped;
    }

    pub fn record_keys(&mut self, summary: &KeySummary) {
        self.distinct_keys = summary.distinct_keys;
        self.duplicated_keys = summary.duplicated_keys;
        self.duplicate_rows = summary.duplicate_rows;
    }

    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }

    pub fn duplicate_share(&self) -> f64 {
        let kept = self.rows_kept();
        if kept == 0 {
            0.0
        } else {
            (self.duplicate_rows as f64 / kept as f64) * 100.0
        }
    }
}
