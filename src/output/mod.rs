pub mod args;
pub mod errors;

use std::path::Path;

use chrono::NaiveDateTime;
use csv::{Terminator, WriterBuilder};

use crate::dataset::Dataset;
use errors::OutputError;

/// Timestamp embedded in record file names (12-hour clock).
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d-%I-%M-%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Grouped dataset with the `is_duplicate` column.
    Analysed,
    /// Key-sorted duplicate rows only.
    Duplicates,
}

impl RecordKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Analysed => "analysed",
            RecordKind::Duplicates => "duplicates",
        }
    }
}

/// The uploaded file name up to its first '.', without any directory.
pub fn base_name(file_name: &str) -> &str {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);
    name.split('.').next().unwrap_or(name)
}

pub fn record_file_name(file_name: &str, kind: RecordKind, at: &NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.csv",
        base_name(file_name),
        kind.tag(),
        at.format(TIMESTAMP_FORMAT)
    )
}

/// Serialises a dataset to CSV in memory. With `include_index` the first
/// column is an unnamed row label holding each row's source index.
pub fn dataset_to_csv(dataset: &Dataset, include_index: bool) -> Result<Vec<u8>, OutputError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    let csv_err = |e: csv::Error| OutputError::CsvOutputError(e.to_string());

    let mut header: Vec<&str> = Vec::with_capacity(dataset.columns().len() + 1);
    if include_index {
        header.push("");
    }
    header.extend(dataset.columns().iter().map(String::as_str));
    writer.write_record(&header).map_err(csv_err)?;

    let mut record: Vec<String> = Vec::with_capacity(header.len());
    for row in dataset.rows() {
        record.clear();
        if include_index {
            record.push(row.index.to_string());
        }
        record.extend(row.cells.iter().map(ToString::to_string));
        writer.write_record(&record).map_err(csv_err)?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::CsvOutputError(e.to_string()))
}
