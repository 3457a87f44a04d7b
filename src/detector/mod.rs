//! Duplicate detection over a single key column.
//!
//! Two orderings live here and must stay distinct: the analysis view groups
//! rows by first appearance of their key, while the duplicates-only export is
//! sorted by key value.

pub mod cache;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::dataset::errors::DatasetError;
use crate::dataset::{CellKey, CellValue, Dataset, Row};

pub const IS_DUPLICATE_COLUMN: &str = "is_duplicate";

/// Grouped rows paired with flags computed against the ungrouped dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub grouped: Dataset,
    pub flags: Vec<bool>,
}

impl AnalysisView {
    pub fn rows(&self) -> impl Iterator<Item = (&Row, bool)> {
        self.grouped.rows().iter().zip(self.flags.iter().copied())
    }

    pub fn duplicate_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Appends (or overwrites) the `is_duplicate` column.
    pub fn into_dataset(self) -> Dataset {
        let (mut columns, mut rows) = self.grouped.into_parts();

        let flag_column = match columns.iter().position(|c| c == IS_DUPLICATE_COLUMN) {
            Some(existing) => existing,
            None => {
                columns.push(IS_DUPLICATE_COLUMN.to_string());
                columns.len() - 1
            }
        };

        for (row, flag) in rows.iter_mut().zip(self.flags) {
            if flag_column < row.cells.len() {
                row.cells[flag_column] = CellValue::Bool(flag);
            } else {
                row.cells.push(CellValue::Bool(flag));
            }
        }

        Dataset::from_parts(columns, rows)
    }
}

fn key_counts(dataset: &Dataset, column: usize) -> HashMap<CellKey<'_>, usize> {
    let mut counts: HashMap<CellKey<'_>, usize> = HashMap::with_capacity(dataset.len());
    for row in dataset.rows() {
        *counts.entry(row.cell(column).key()).or_default() += 1;
    }
    counts
}

/// Positions of the input rows in grouped order.
fn grouped_positions(dataset: &Dataset, column: usize) -> Vec<usize> {
    let mut groups: IndexMap<CellKey<'_>, Vec<usize>> = IndexMap::new();
    for (pos, row) in dataset.rows().iter().enumerate() {
        groups.entry(row.cell(column).key()).or_default().push(pos);
    }
    groups.into_values().flatten().collect()
}

/// Makes rows sharing a key contiguous. Groups appear in the order their key
/// first appears and keep their internal order.
pub fn group_by_key_stable(dataset: &Dataset, key: &str) -> Result<Dataset, DatasetError> {
    let column = dataset.column_index(key)?;
    let rows = grouped_positions(dataset, column)
        .into_iter()
        .map(|pos| dataset.rows()[pos].clone())
        .collect();
    Ok(dataset.with_rows(rows))
}

/// One flag per input row: true when the row's key occurs more than once in
/// the whole dataset.
pub fn flag_duplicates(dataset: &Dataset, key: &str) -> Result<Vec<bool>, DatasetError> {
    let column = dataset.column_index(key)?;
    let counts = key_counts(dataset, column);
    Ok(dataset
        .rows()
        .iter()
        .map(|row| counts.get(&row.cell(column).key()).is_some_and(|&n| n >= 2))
        .collect())
}

/// Only the duplicated rows, stably sorted by key value.
pub fn extract_duplicates_only(dataset: &Dataset, key: &str) -> Result<Dataset, DatasetError> {
    let column = dataset.column_index(key)?;
    let flags = flag_duplicates(dataset, key)?;

    let mut rows: Vec<Row> = dataset
        .rows()
        .iter()
        .zip(flags)
        .filter_map(|(row, dup)| dup.then(|| row.clone()))
        .collect();
    rows.sort_by(|a, b| a.cell(column).key().cmp(&b.cell(column).key()));

    Ok(dataset.with_rows(rows))
}

/// Groups the dataset and carries over each row's flag from the ungrouped
/// dataset.
pub fn analysis_view(dataset: &Dataset, key: &str) -> Result<AnalysisView, DatasetError> {
    let column = dataset.column_index(key)?;
    let flags = flag_duplicates(dataset, key)?;

    let (rows, grouped_flags): (Vec<Row>, Vec<bool>) = grouped_positions(dataset, column)
        .into_iter()
        .map(|pos| (dataset.rows()[pos].clone(), flags[pos]))
        .unzip();

    Ok(AnalysisView {
        grouped: dataset.with_rows(rows),
        flags: grouped_flags,
    })
}

/// Grouped dataset with an `is_duplicate` column.
pub fn annotate(dataset: &Dataset, key: &str) -> Result<Dataset, DatasetError> {
    analysis_view(dataset, key).map(AnalysisView::into_dataset)
}

/// Key counts over a whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySummary {
    pub distinct_keys: usize,
    pub duplicated_keys: usize,
    pub duplicate_rows: usize,
}

pub fn key_summary(dataset: &Dataset, key: &str) -> Result<KeySummary, DatasetError> {
    let column = dataset.column_index(key)?;
    let counts = key_counts(dataset, column);

    let mut summary = KeySummary {
        distinct_keys: counts.len(),
        ..KeySummary::default()
    };
    for &n in counts.values().filter(|&&n| n >= 2) {
        summary.duplicated_keys += 1;
        summary.duplicate_rows += n;
    }
    Ok(summary)
}
