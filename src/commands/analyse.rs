use comfy_table::Color;

use crate::detector::AnalysisView;
use crate::visuals;

/// Prints the grouped dataset, highlighting rows whose key repeats.
pub fn print_analysis(view: &AnalysisView, highlight: Color) {
    let table = visuals::analysis_table(view, highlight);
    println!("{table}");
}
