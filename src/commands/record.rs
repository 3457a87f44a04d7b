use chrono::NaiveDateTime;

use crate::error::AppError;
use crate::output::{self, RecordKind};
use crate::request::Request;

/// A record serialised in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRecord {
    pub kind: RecordKind,
    pub file_name: String,
    pub contents: Vec<u8>,
}

pub fn prepare_record(
    request: &mut Request,
    kind: RecordKind,
    at: &NaiveDateTime,
) -> Result<PreparedRecord, AppError> {
    let dataset = match kind {
        RecordKind::Analysed => request.annotated()?,
        RecordKind::Duplicates => request.duplicates_only()?,
    };

    let contents = output::dataset_to_csv(&dataset, request.settings().index)?;
    let file_name = output::record_file_name(&request.upload().name, kind, at);

    Ok(PreparedRecord {
        kind,
        file_name,
        contents,
    })
}
