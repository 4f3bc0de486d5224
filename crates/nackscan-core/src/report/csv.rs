//! CSV reporter: the published cluster summary table.

use csv::WriterBuilder;

use super::{render_breakdown, render_set, Reporter};
use crate::engine::AnalysisReport;
use crate::errors::ReportError;

/// Column order of the published summary table. Downstream consumers key
/// on these names; changing them is a breaking change.
pub const SUMMARY_COLUMNS: &[&str] = &[
    "Cluster_Id",
    "Cluster",
    "Total_Unique_Uti_Ids",
    "Total_Unique_Fo_Message_Ids",
    "Number_of_Errors",
    "Number_of_NACK_Types",
    "JUR_Breakdown",
    "Month_Breakdown",
    "Product_Breakdown",
    "FO_Systems",
    "Asset_Classes",
];

/// CSV reporter writing every summary row, never truncated.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for CsvReporter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, ReportError> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer
            .write_record(SUMMARY_COLUMNS)
            .map_err(|e| ReportError::Serialize(e.to_string()))?;

        for row in &report.rows {
            writer
                .write_record(&[
                    row.cluster_id.clone(),
                    row.signature.clone(),
                    row.total_unique_uti_ids.to_string(),
                    row.total_unique_fo_message_ids.to_string(),
                    row.number_of_errors.to_string(),
                    row.number_of_nack_types.to_string(),
                    render_breakdown(&row.jur_breakdown),
                    render_breakdown(&row.month_breakdown),
                    render_breakdown(&row.product_breakdown),
                    render_set(&row.fo_systems),
                    render_set(&row.asset_classes),
                ])
                .map_err(|e| ReportError::Serialize(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ReportError::Serialize(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ReportError::Serialize(e.to_string()))
    }
}
