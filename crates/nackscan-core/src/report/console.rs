//! Console reporter: human-readable terminal output.

use super::{render_breakdown, Reporter};
use crate::engine::AnalysisReport;
use crate::errors::ReportError;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    /// Summary rows to show; 0 keeps every row.
    pub top: usize,
}

impl ConsoleReporter {
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

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, ReportError> {
        let mut output = String::new();

        output.push_str("╔══════════════════════════════════════════╗\n");
        output.push_str("║        nackscan Error-Cluster Report     ║\n");
        output.push_str("╚══════════════════════════════════════════╝\n\n");

        output.push_str(&format!("Mode: {}\n", report.mode));
        output.push_str(&format!(
            "Records: {}   Bundles: {}   Clusters: {}   Jurisdictions: {}   ({} ms)\n\n",
            report.stats.records_in,
            report.stats.bundles_built,
            report.stats.clusters_found,
            report.stats.jurisdictions_seen,
            report.stats.duration_ms
        ));

        if report.rows.is_empty() {
            output.push_str("No clusters found.\n");
            return Ok(output);
        }

        let shown = self.row_limit(report.rows.len());
        output.push_str(&format!(
            "Top {} of {} clusters by unique FO messages:\n",
            shown,
            report.rows.len()
        ));
        for (rank, row) in report.rows.iter().take(shown).enumerate() {
            output.push_str(&format!(
                "{:>4}. {} msgs / {} UTIs / {} errors / {} NACK types  [{}]\n",
                rank + 1,
                row.total_unique_fo_message_ids,
                row.total_unique_uti_ids,
                row.number_of_errors,
                row.number_of_nack_types,
                row.cluster_id
            ));
            output.push_str(&format!("      {}\n", row.signature));
            output.push_str(&format!(
                "      jurisdictions: {}\n",
                render_breakdown(&row.jur_breakdown)
            ));
        }

        output.push_str("\nRegion-exclusive clusters:\n");
        if report.exclusives.is_empty() {
            output.push_str("  (none)\n");
        } else {
            for exclusive in &report.exclusives {
                output.push_str(&format!(
                    "  {}: {}\n",
                    exclusive.jurisdiction,
                    exclusive.signatures.join("; ")
                ));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::SignatureMode;
    use crate::engine::AnalysisEngine;
    use crate::records::{month_label, RejectionRecord};
    use chrono::NaiveDate;

    fn record(uti: &str, msg: &str, error: &str, jurisdiction: &str) -> RejectionRecord {
        let snapshot_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        RejectionRecord {
            uti_id: uti.into(),
            fo_message_id: msg.into(),
            error_description: error.into(),
            nack_type: "NACK1".into(),
            jurisdiction: jurisdiction.into(),
            month: month_label(snapshot_date),
            snapshot_date,
            fo_system: "Murex".into(),
            asset_class: "Rates".into(),
            product_type: "Swap".into(),
        }
    }

    #[test]
    fn renders_header_stats_and_clusters() {
        let records = vec![
            record("T1", "M1", "ErrA", "US"),
            record("T2", "M2", "ErrA", "US"),
            record("T3", "M3", "ErrB", "EU"),
        ];
        let report = AnalysisEngine::new(SignatureMode::default()).run(&records);
        let output = ConsoleReporter::default().generate(&report).unwrap();
        assert!(output.contains("nackscan Error-Cluster Report"));
        assert!(output.contains("Mode: unordered"));
        assert!(output.contains("Records: 3"));
        assert!(output.contains("ErrA"));
        assert!(output.contains("Region-exclusive clusters:"));
        assert!(output.contains("EU: ErrB"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = AnalysisEngine::new(SignatureMode::default()).run(&[]);
        let output = ConsoleReporter::default().generate(&report).unwrap();
        assert!(output.contains("No clusters found."));
    }

    #[test]
    fn top_limit_truncates_rows() {
        let records: Vec<RejectionRecord> = (0..5)
            .map(|i| record(&format!("T{i}"), &format!("M{i}"), &format!("Err{i}"), "US"))
            .collect();
        let report = AnalysisEngine::new(SignatureMode::default()).run(&records);
        let output = ConsoleReporter::new(2).generate(&report).unwrap();
        assert!(output.contains("Top 2 of 5 clusters"));
    }
}
