pub mod analyse;
pub mod record;
pub mod stats;

use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use comfy_table::Color;
use tracing::debug;

use crate::args::{Action, Args};
use crate::detector;
use crate::error::AppError;
use crate::output::RecordKind;
use crate::request::{Request, Upload};
use crate::settings::Settings;
use crate::writer::write_records;
pub use record::PreparedRecord;
pub use stats::ScanStats;

/// Runs one request from parsed command-line arguments.
pub fn run(args: &Args) -> Result<ScanStats, AppError> {
    let settings = Settings::resolve(args)?;
    let highlight = settings.highlight_color()?;

    let result = (|| -> Result<ScanStats, AppError> {
        let upload = args
            .input
            .file
            .as_deref()
            .map(Upload::from_path)
            .transpose()?;
        let mut request = Request::new(upload, settings)?;
        execute(
            &mut request,
            &args.actions.selected(),
            highlight,
            &Local::now().naive_local(),
        )
    })();

    match (&args.input.file, result) {
        (Some(file), Err(e)) => Err(AppError::InFile {
            file: file.clone(),
            source: Box::new(e),
        }),
        (_, result) => result,
    }
}

/// Runs the actions against one request. Everything is computed before any
/// record is written, and records are written all together or not at all.
/// The table is printed last, so a failing request leaves no output behind.
pub fn execute(
    request: &mut Request,
    actions: &[Action],
    highlight: Color,
    at: &NaiveDateTime,
) -> Result<ScanStats, AppError> {
    let start = Instant::now();
    let mut stats = ScanStats::new(&request.upload().name, &request.settings().key);

    let base = request.dataset()?;
    if let Some(report) = request.report() {
        stats.record_load(report);
    }
    stats.record_keys(&detector::key_summary(&base, &request.settings().key)?);

    let mut view = None;
    let mut records: Vec<PreparedRecord> = Vec::new();
    for action in actions {
        debug!(?action, "preparing action");
        match action {
            Action::Analyse => view = Some(request.analysis_view()?),
            Action::AnalysisRecord => {
                records.push(record::prepare_record(request, RecordKind::Analysed, at)?)
            }
            Action::DuplicateRecord => {
                records.push(record::prepare_record(request, RecordKind::Duplicates, at)?)
            }
        }
    }

    if !records.is_empty() {
        stats.records_written = write_records(
            &request.settings().out,
            records
                .iter()
                .map(|r| (r.file_name.as_str(), r.contents.as_slice())),
        )?;
    }

    if let Some(view) = &view {
        analyse::print_analysis(view, highlight);
    }

    stats.cache_hits = request.cache().hits();
    stats.total_duration = start.elapsed();
    Ok(stats)
}
