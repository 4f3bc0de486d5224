//! JSON reporter: the full report, machine-readable.

use super::Reporter;
use crate::engine::AnalysisReport;
use crate::errors::ReportError;

/// JSON reporter serializing the complete report, rows untruncated.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, ReportError> {
        serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialize(e.to_string()))
    }
}
