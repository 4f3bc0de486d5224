//! Reporters: output formats for analysis results.
//!
//! 4 reporter formats: console, markdown, CSV summary table, JSON.
//! The row limit passed to `create_reporter` truncates the human-readable
//! formats; CSV and JSON always carry every row.

pub mod console;
pub mod csv;
pub mod json;
pub mod markdown;

use itertools::Itertools;

use crate::engine::AnalysisReport;
use crate::errors::ReportError;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &AnalysisReport) -> Result<String, ReportError>;
}

/// Create a reporter by format name. `top` limits rendered table rows for
/// the human-readable formats; 0 keeps every row.
pub fn create_reporter(format: &str, top: usize) -> Option<Box<dyn Reporter>> {
    match format {
        "console" => Some(Box::new(console::ConsoleReporter::new(top))),
        "markdown" => Some(Box::new(markdown::MarkdownReporter::new(top))),
        "csv" => Some(Box::new(csv::CsvReporter::new())),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["console", "markdown", "csv", "json"]
}

/// Renders breakdown pairs as `"key: count"` joined with `"; "`.
pub(crate) fn render_breakdown(pairs: &[(String, u64)]) -> String {
    pairs
        .iter()
        .map(|(key, count)| format!("{key}: {count}"))
        .join("; ")
}

/// Renders a sorted set cell joined with `", "`.
pub(crate) fn render_set(values: &[String]) -> String {
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_knows_every_advertised_format() {
        for format in available_formats() {
            let reporter = create_reporter(format, 0).unwrap();
            assert_eq!(&reporter.name(), format);
        }
        assert!(create_reporter("xml", 0).is_none());
    }

    #[test]
    fn breakdown_and_set_cells_render_flat() {
        let pairs = vec![("EMIR".to_string(), 3), ("CFTC".to_string(), 1)];
        assert_eq!(render_breakdown(&pairs), "EMIR: 3; CFTC: 1");
        assert_eq!(render_breakdown(&[]), "");
        let values = vec!["Calypso".to_string(), "Murex".to_string()];
        assert_eq!(render_set(&values), "Calypso, Murex");
    }
}
