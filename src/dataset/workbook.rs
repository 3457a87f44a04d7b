use std::io::Cursor;

use calamine::{Data, DataType, ExcelDateTime, Range, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use super::RawTable;
use super::errors::DatasetError;
use super::value::{CellValue, is_missing_text};

/// Reads one worksheet of an xlsx/xlsm/xlsb/xls/ods workbook held in memory.
///
/// Without a sheet name the first worksheet is used.
pub fn read_workbook(raw: &[u8], sheet: Option<&str>) -> Result<RawTable, DatasetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(raw))
        .map_err(|e| DatasetError::ParseError(format!("failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names();
    let range = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(DatasetError::ParseError(format!(
                    "sheet not found: '{}'. Available sheets: {}",
                    name,
                    sheet_names.join(", ")
                )));
            }
            workbook
                .worksheet_range(name)
                .map_err(|e| DatasetError::ParseError(format!("failed to read sheet: {}", e)))?
        }
        None => {
            if sheet_names.len() > 1 {
                debug!(sheet = %sheet_names[0], count = sheet_names.len(), "using first worksheet");
            }
            workbook
                .worksheet_range_at(0)
                .ok_or_else(|| DatasetError::ParseError("workbook has no sheets".to_string()))?
                .map_err(|e| DatasetError::ParseError(format!("failed to read sheet: {}", e)))?
        }
    };

    range_to_table(&range)
}

fn range_to_table(range: &Range<Data>) -> Result<RawTable, DatasetError> {
    let mut rows = range.rows();

    let header_row = rows
        .next()
        .ok_or_else(|| DatasetError::ParseError("no header row found".to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| match cell {
            Data::Empty | Data::Error(_) => String::new(),
            other => other.to_string(),
        })
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::ParseError("no header row found".to_string()));
    }

    let width = headers.len();
    let records = rows
        .map(|row| {
            let mut cells: Vec<Option<CellValue>> = row.iter().map(convert_cell).collect();
            cells.resize(width, None);
            cells
        })
        .collect();

    Ok(RawTable { headers, records })
}

fn convert_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Int(i) => Some(CellValue::Int(*i)),
        Data::Float(f) if !f.is_finite() => None,
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::String(s) if is_missing_text(s) => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::DateTime(dt) => Some(CellValue::Text(render_excel_datetime(dt))),
        Data::DateTimeIso(s) => Some(CellValue::Text(
            cell.as_datetime()
                .map(render_datetime)
                .unwrap_or_else(|| s.clone()),
        )),
        Data::DurationIso(s) => Some(CellValue::Text(
            cell.as_duration()
                .map(render_duration)
                .unwrap_or_else(|| s.clone()),
        )),
    }
}

// Serial values only mean something through the cell's number format.
fn render_excel_datetime(dt: &ExcelDateTime) -> String {
    let rendered = if dt.is_duration() {
        dt.as_duration().map(render_duration)
    } else {
        dt.as_datetime().map(render_datetime)
    };
    rendered.unwrap_or_else(|| dt.to_string())
}

/// `2021-11-11 00:00:00`, with fractional seconds only when present.
fn render_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

/// `0 days 01:30:00`
fn render_duration(d: TimeDelta) -> String {
    let secs = d.num_seconds();
    let (days, rest) = (secs.div_euclid(86_400), secs.rem_euclid(86_400));
    format!(
        "{} days {:02}:{:02}:{:02}",
        days,
        rest / 3600,
        rest % 3600 / 60,
        rest % 60
    )
}
