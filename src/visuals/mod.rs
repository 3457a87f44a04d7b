pub mod formatters;

use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::stats::ScanStats;
use crate::detector::AnalysisView;
use formatters::{format_count, format_share};

/// Grouped rows with a leading row-label column. Duplicate rows get the
/// highlight as background colour; the flag itself is not shown.
pub fn analysis_table(view: &AnalysisView, highlight: Color) -> Table {
    let mut table = Table::new();

    let mut header = vec![Cell::new("")];
    header.extend(
        view.grouped
            .columns()
            .iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
    );
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for (row, is_duplicate) in view.rows() {
        let style = |cell: Cell| {
            if is_duplicate {
                cell.bg(highlight).fg(Color::Black)
            } else {
                cell
            }
        };

        let mut cells = vec![style(Cell::new(row.index).set_alignment(CellAlignment::Right))];
        cells.extend(row.cells.iter().map(|value| style(Cell::new(value))));
        table.add_row(cells);
    }

    table
}

pub fn print_summary(stats: &ScanStats) {
    println!(
        "✓ Scanned {} rows of '{}' in {}ms ({} duplicate rows across {} keys, {} rows dropped)",
        format_count(stats.rows_kept()),
        stats.file_name,
        stats.total_duration.as_millis(),
        format_count(stats.duplicate_rows),
        format_count(stats.duplicated_keys),
        format_count(stats.rows_dropped),
    );
    for path in &stats.records_written {
        println!("✓ Wrote {}", path.display());
    }
}

pub fn print_detailed(stats: &ScanStats) {
    let mut summary_table = Table::new();
    summary_table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Scan Summary")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Left),
            Cell::new(""),
        ]);

    summary_table.add_row(vec!["File", &stats.file_name]);
    summary_table.add_row(vec!["Key Column", &stats.key]);
    summary_table.add_row(vec![
        "Scan Time",
        &format!("{}ms", stats.total_duration.as_millis()),
    ]);
    summary_table.add_row(vec!["Rows Read", &format_count(stats.rows_read)]);
    summary_table.add_row(vec![
        "Rows Dropped",
        &format!(
            "{} ({})",
            format_count(stats.rows_dropped),
            format_share(stats.rows_dropped, stats.rows_read)
        ),
    ]);
    summary_table.add_row(vec!["Distinct Keys", &format_count(stats.distinct_keys)]);
    summary_table.add_row(vec![
        "Duplicated Keys",
        &format_count(stats.duplicated_keys),
    ]);
    summary_table.add_row(vec![
        "Duplicate Rows",
        &format!(
            "{} ({:.1}%)",
            format_count(stats.duplicate_rows),
            stats.duplicate_share()
        ),
    ]);
    summary_table.add_row(vec!["Cache Hits", &format_count(stats.cache_hits)]);

    println!("{summary_table}\n");

    if stats.records_written.is_empty() {
        return;
    }

    let mut record_table = Table::new();
    record_table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Records Written").add_attribute(Attribute::Bold)]);
    for path in &stats.records_written {
        record_table.add_row(vec![Cell::new(path.display())]);
    }

    println!("{record_table}");
}
