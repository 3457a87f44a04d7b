pub mod args;
mod delimited;
pub mod errors;
pub mod value;
mod workbook;

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use errors::DatasetError;
pub use value::{CellKey, CellValue};

/// Default key column.
pub const MATERIAL_NUMBER: &str = "Material Number";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0";
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A data row. `index` is its position among the data rows of the source
/// file and stays attached to the row through every reordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn cell(&self, column: usize) -> &CellValue {
        &self.cells[column]
    }
}

/// Ordered rows sharing one set of columns, with no missing cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self, DatasetError> {
        if let Some(row) = rows.iter().find(|r| r.cells.len() != columns.len()) {
            return Err(DatasetError::ParseError(format!(
                "row {} has {} cells, expected {}",
                row.index,
                row.cells.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Builds a dataset from plain records, numbering rows from zero.
    pub fn from_records<C, R>(columns: &[&str], records: R) -> Result<Self, DatasetError>
    where
        C: IntoIterator<Item = CellValue>,
        R: IntoIterator<Item = C>,
    {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, cells)| Row {
                index,
                cells: cells.into_iter().collect(),
            })
            .collect();
        Self::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DatasetError::SchemaError(name.to_string()))
    }

    /// Same columns, different rows. Rows must come from this dataset.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited,
    Workbook,
}

#[derive(Debug, Clone)]
pub struct LoadOptions<'a> {
    pub file_name: &'a str,
    pub key: &'a str,
    pub sheet: Option<&'a str>,
    pub delimiter: u8,
}

impl<'a> LoadOptions<'a> {
    pub fn new(file_name: &'a str) -> Self {
        Self {
            file_name,
            key: MATERIAL_NUMBER,
            sheet: None,
            delimiter: b',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub format: SourceFormat,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Cells straight out of a reader, before headers are cleaned and
/// incomplete rows are dropped.
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<Option<CellValue>>>,
}

pub fn detect_format(file_name: &str, raw: &[u8]) -> SourceFormat {
    if raw.starts_with(ZIP_MAGIC) || raw.starts_with(OLE_MAGIC) {
        return SourceFormat::Workbook;
    }

    let is_workbook_ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|w| w.eq_ignore_ascii_case(ext))
        });

    if is_workbook_ext {
        SourceFormat::Workbook
    } else {
        SourceFormat::Delimited
    }
}

/// Parses an uploaded spreadsheet and drops every row with a missing cell.
pub fn load(raw: &[u8], options: &LoadOptions) -> Result<Dataset, DatasetError> {
    load_with_report(raw, options).map(|(dataset, _)| dataset)
}

pub fn load_with_report(
    raw: &[u8],
    options: &LoadOptions,
) -> Result<(Dataset, LoadReport), DatasetError> {
    if raw.is_empty() {
        return Err(DatasetError::ParseError(format!(
            "file is empty: {}",
            options.file_name
        )));
    }

    let format = detect_format(options.file_name, raw);
    debug!(file = options.file_name, ?format, bytes = raw.len(), "detected input format");

    let table = match format {
        SourceFormat::Delimited => delimited::read_delimited(raw, options.delimiter)?,
        SourceFormat::Workbook => workbook::read_workbook(raw, options.sheet)?,
    };

    let columns = normalize_headers(&table.headers);
    if !columns.iter().any(|c| c == options.key) {
        return Err(DatasetError::SchemaError(options.key.to_string()));
    }

    let rows_read = table.records.len();
    let rows: Vec<Row> = table
        .records
        .into_iter()
        .enumerate()
        .filter_map(|(index, cells)| {
            cells
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .map(|cells| Row { index, cells })
        })
        .collect();

    let report = LoadReport {
        format,
        rows_read,
        rows_dropped: rows_read - rows.len(),
    };
    info!(
        file = options.file_name,
        rows_read = report.rows_read,
        rows_dropped = report.rows_dropped,
        "loaded dataset"
    );

    Ok((Dataset::from_parts(columns, rows), report))
}

/// Trims headers, names blank ones `Unnamed: {i}` and suffixes repeats
/// with `.1`, `.2`, ...
fn normalize_headers(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());

    for (i, header) in headers.iter().enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {}", i),
            h => h.to_string(),
        };

        let mut name = base.clone();
        while let Some(count) = seen.get_mut(&name) {
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        seen.insert(name.clone(), 0);
        out.push(name);
    }

    out
}
