use csv::ReaderBuilder;

use super::RawTable;
use super::errors::DatasetError;
use super::value::CellValue;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads delimited text with the first record as the header row.
pub fn read_delimited(raw: &[u8], delimiter: u8) -> Result<RawTable, DatasetError> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(raw);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::ParseError(format!("failed to read header row: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::ParseError("no header row found".to_string()));
    }

    let width = headers.len();
    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            DatasetError::ParseError(format!("failed to read data row {}: {}", idx + 1, e))
        })?;

        if record.len() > width {
            return Err(DatasetError::ParseError(format!(
                "expected {} fields in data row {}, saw {}",
                width,
                idx + 1,
                record.len()
            )));
        }

        let mut cells: Vec<Option<CellValue>> = record.iter().map(CellValue::from_text).collect();
        cells.resize(width, None);
        records.push(cells);
    }

    Ok(RawTable { headers, records })
}
