//! Analysis pipeline orchestration.
//!
//! Single-pass batch flow: normalize → bundle → aggregate → regional.
//! The engine is deliberately single-threaded; every intermediate carries
//! sum-merge semantics, so partitioning the input stays an option.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bundles::BundleBuilder;
use crate::clusters::{ClusterAggregator, ClusterSummaryRow, SignatureMode};
use crate::config::NackscanConfig;
use crate::errors::{ConfigError, ParseError, PipelineError};
use crate::loader::CsvLoader;
use crate::records::{RawRecord, RecordNormalizer, RejectionRecord};
use crate::regional::{ExclusivityFinder, JurisdictionExclusives, JurisdictionMatrix};

/// Statistics about one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub records_in: usize,
    pub bundles_built: usize,
    /// Clusters found before the `min_bundles` floor is applied.
    pub clusters_found: usize,
    pub jurisdictions_seen: usize,
    pub duration_ms: u64,
}

/// Result of a full analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Mode the signatures were built under; travels with the data so a
    /// report is interpretable on its own.
    pub mode: SignatureMode,
    pub rows: Vec<ClusterSummaryRow>,
    pub matrix: JurisdictionMatrix,
    pub exclusives: Vec<JurisdictionExclusives>,
    pub stats: AnalysisStats,
}

/// Batch engine tying the pipeline stages together.
pub struct AnalysisEngine {
    normalizer: RecordNormalizer,
    mode: SignatureMode,
    min_bundles: usize,
}

impl AnalysisEngine {
    pub fn new(mode: SignatureMode) -> Self {
        Self {
            normalizer: RecordNormalizer::new(),
            mode,
            min_bundles: 1,
        }
    }

    /// Builds an engine from resolved configuration.
    pub fn from_config(config: &NackscanConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            normalizer: RecordNormalizer::with_formats(&config.load.effective_date_formats()),
            mode: config.analysis.signature_mode()?,
            min_bundles: config.analysis.effective_min_bundles(),
        })
    }

    pub fn mode(&self) -> SignatureMode {
        self.mode
    }

    /// Runs the pipeline over raw rows straight from the loader.
    pub fn run_raw(&self, rows: &[RawRecord]) -> Result<AnalysisReport, ParseError> {
        let records = self.normalizer.normalize(rows)?;
        Ok(self.run(&records))
    }

    /// Loads a rejection extract from disk and runs the full pipeline.
    pub fn run_file(
        &self,
        path: &Path,
        loader: &CsvLoader,
    ) -> Result<AnalysisReport, PipelineError> {
        let rows = loader.load_path(path)?;
        let report = self.run_raw(&rows)?;
        Ok(report)
    }

    /// Runs the pipeline over already-normalized records.
    ///
    /// Deterministic for a given input and mode. Empty input produces an
    /// empty report, not an error.
    pub fn run(&self, records: &[RejectionRecord]) -> AnalysisReport {
        let start = Instant::now();

        let bundles = BundleBuilder::new().build(records);
        let aggregator = ClusterAggregator::with_min_bundles(self.mode, self.min_bundles);
        let clusters = aggregator.aggregate(&bundles);
        let rows = aggregator.summarize(&clusters);

        let finder = ExclusivityFinder::new();
        let matrix = finder.build_matrix(&bundles, self.mode);
        let exclusives = finder.find(&matrix);

        let stats = AnalysisStats {
            records_in: records.len(),
            bundles_built: bundles.len(),
            clusters_found: clusters.len(),
            jurisdictions_seen: matrix.jurisdiction_count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            records = stats.records_in,
            bundles = stats.bundles_built,
            clusters = stats.clusters_found,
            jurisdictions = stats.jurisdictions_seen,
            duration_ms = stats.duration_ms,
            mode = %self.mode,
            "Analysis complete"
        );

        AnalysisReport {
            mode: self.mode,
            rows,
            matrix,
            exclusives,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::SignatureOrdering;
    use crate::records::month_label;
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
    fn empty_input_produces_empty_report() {
        let report = AnalysisEngine::new(SignatureMode::default()).run(&[]);
        assert!(report.rows.is_empty());
        assert!(report.matrix.is_empty());
        assert!(report.exclusives.is_empty());
        assert_eq!(report.stats.records_in, 0);
        assert_eq!(report.stats.bundles_built, 0);
    }

    #[test]
    fn report_carries_mode_and_stats() {
        let mode = SignatureMode {
            ordering: SignatureOrdering::Ordered,
            include_nack_types: true,
            split_by_jurisdiction: false,
        };
        let records = vec![
            record("T1", "M1", "ErrA", "US"),
            record("T2", "M2", "ErrA", "EU"),
        ];
        let report = AnalysisEngine::new(mode).run(&records);
        assert_eq!(report.mode, mode);
        assert_eq!(report.stats.records_in, 2);
        assert_eq!(report.stats.bundles_built, 2);
        assert_eq!(report.stats.clusters_found, 1);
        assert_eq!(report.stats.jurisdictions_seen, 2);
    }

    #[test]
    fn runs_are_deterministic() {
        let records = vec![
            record("T1", "M1", "ErrB", "US"),
            record("T2", "M2", "ErrA", "EU"),
            record("T3", "M3", "ErrA", "US"),
        ];
        let engine = AnalysisEngine::new(SignatureMode::default());
        let a = engine.run(&records);
        let b = engine.run(&records);
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(a.exclusives, b.exclusives);
    }
}
