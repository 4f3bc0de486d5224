//! Markdown reporter: summary table, jurisdiction matrix and exclusives.

use super::{render_breakdown, render_set, Reporter};
use crate::engine::AnalysisReport;
use crate::errors::ReportError;
use crate::regional::TOTAL_LABEL;

/// Markdown reporter producing a self-contained report document.
pub struct MarkdownReporter {
    /// Table rows to show per section; 0 keeps every row.
    pub top: usize,
}

impl MarkdownReporter {
    pub fn new(top: usize) -> Self {
        Self { top }
    }

    fn row_limit(&self, total: usize) -> usize {
        if self.top == 0 {
            total
        } else {
            self.top.min(total)
        }
    }
}

impl Reporter for MarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, ReportError> {
        let mut output = String::new();

        output.push_str("# nackscan Error-Cluster Report\n\n");
        output.push_str(&format!(
            "Mode `{}`. {} records, {} bundles, {} clusters, {} jurisdictions ({} ms).\n\n",
            report.mode,
            report.stats.records_in,
            report.stats.bundles_built,
            report.stats.clusters_found,
            report.stats.jurisdictions_seen,
            report.stats.duration_ms
        ));

        self.summary_section(&mut output, report);
        self.matrix_section(&mut output, report);
        self.exclusives_section(&mut output, report);

        Ok(output)
    }
}

impl MarkdownReporter {
    fn summary_section(&self, output: &mut String, report: &AnalysisReport) {
        output.push_str("## Cluster summary\n\n");
        if report.rows.is_empty() {
            output.push_str("No clusters found.\n\n");
            return;
        }

        output.push_str(
            "| # | Cluster_Id | Cluster | Total_Unique_Uti_Ids | Total_Unique_Fo_Message_Ids \
             | Number_of_Errors | Number_of_NACK_Types | JUR_Breakdown | Month_Breakdown \
             | Product_Breakdown | FO_Systems | Asset_Classes |\n",
        );
        output.push_str(
            "|---|---|---|---:|---:|---:|---:|---|---|---|---|---|\n",
        );

        let shown = self.row_limit(report.rows.len());
        for (rank, row) in report.rows.iter().take(shown).enumerate() {
            output.push_str(&format!(
                "| {} | `{}` | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                rank + 1,
                row.cluster_id,
                escape_cell(&row.signature),
                row.total_unique_uti_ids,
                row.total_unique_fo_message_ids,
                row.number_of_errors,
                row.number_of_nack_types,
                escape_cell(&render_breakdown(&row.jur_breakdown)),
                escape_cell(&render_breakdown(&row.month_breakdown)),
                escape_cell(&render_breakdown(&row.product_breakdown)),
                escape_cell(&render_set(&row.fo_systems)),
                escape_cell(&render_set(&row.asset_classes)),
            ));
        }
        if shown < report.rows.len() {
            output.push_str(&format!(
                "\n{} more clusters omitted.\n",
                report.rows.len() - shown
            ));
        }
        output.push('\n');
    }

    fn matrix_section(&self, output: &mut String, report: &AnalysisReport) {
        output.push_str("## Jurisdiction matrix\n\n");
        let matrix = &report.matrix;
        if matrix.is_empty() {
            output.push_str("No data.\n\n");
            return;
        }

        let jurisdictions: Vec<&str> = matrix.jurisdictions().collect();
        // Margin labels render bold; a data jurisdiction named Total stays plain.
        output.push_str("| Cluster |");
        for jurisdiction in &jurisdictions {
            output.push_str(&format!(" {} |", escape_cell(jurisdiction)));
        }
        output.push_str(&format!(" **{TOTAL_LABEL}** |\n"));
        output.push_str("|---|");
        for _ in 0..(jurisdictions.len() + 1) {
            output.push_str("---:|");
        }
        output.push('\n');

        // Largest rows first so truncation keeps the interesting ones.
        let mut signatures: Vec<&str> = matrix.signatures().collect();
        signatures.sort_by(|a, b| {
            matrix
                .row_total(b)
                .cmp(&matrix.row_total(a))
                .then_with(|| a.cmp(b))
        });

        let shown = self.row_limit(signatures.len());
        for signature in signatures.iter().take(shown) {
            output.push_str(&format!("| {} |", escape_cell(signature)));
            for jurisdiction in &jurisdictions {
                output.push_str(&format!(" {} |", matrix.count(signature, jurisdiction)));
            }
            output.push_str(&format!(" {} |\n", matrix.row_total(signature)));
        }

        output.push_str(&format!("| **{TOTAL_LABEL}** |"));
        for jurisdiction in &jurisdictions {
            output.push_str(&format!(" {} |", matrix.column_total(jurisdiction)));
        }
        output.push_str(&format!(" {} |\n", matrix.grand_total()));

        if shown < signatures.len() {
            output.push_str(&format!(
                "\n{} more rows omitted; margins cover the full matrix.\n",
                signatures.len() - shown
            ));
        }
        output.push('\n');
    }

    fn exclusives_section(&self, output: &mut String, report: &AnalysisReport) {
        output.push_str("## Region-exclusive clusters\n\n");
        if report.exclusives.is_empty() {
            output.push_str(
                "None. Exclusivity requires at least two jurisdictions with \
                 clusters occurring in exactly one of them.\n",
            );
            return;
        }
        for exclusive in &report.exclusives {
            output.push_str(&format!(
                "### {} ({})\n\n",
                escape_cell(&exclusive.jurisdiction),
                exclusive.signatures.len()
            ));
            for signature in &exclusive.signatures {
                output.push_str(&format!(
                    "- {} ({} occurrences)\n",
                    escape_cell(signature),
                    report.matrix.count(signature, &exclusive.jurisdiction)
                ));
            }
            output.push('\n');
        }
    }
}

/// Signatures can contain `|` (the NACK-type separator), which would break
/// table cells.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
