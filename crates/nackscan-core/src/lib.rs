//! nackscan-core: Error-cluster analysis engine for trade-repository NACKs
//!
//! This crate provides the analysis components for nackscan:
//! - Records: Typed rejection rows, date coercion, month labels
//! - Loader: CSV ingestion with header schema validation
//! - Bundles: Grouping rows by (UTI, FO message) pair
//! - Clusters: Canonical signatures and per-cluster statistics
//! - Regional: Jurisdiction matrix and exclusivity detection
//! - Engine: Single-pass batch orchestration
//! - Report: Console, markdown, CSV and JSON renderers
//! - Config: Layered TOML configuration
//! - Errors: One error enum per subsystem

pub mod bundles;
pub mod clusters;
pub mod config;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod records;
pub mod regional;
pub mod report;

// Re-exports for convenience
pub use bundles::{Bundle, BundleBuilder, BundleKey};
pub use clusters::{
    build_signature, cluster_id, Cluster, ClusterAggregator, ClusterSummaryRow, CountMap,
    SignatureMode, SignatureOrdering,
};
pub use config::{AnalysisConfig, CliOverrides, LoadConfig, NackscanConfig, ReportConfig};
pub use engine::{AnalysisEngine, AnalysisReport, AnalysisStats};
pub use errors::{
    ConfigError, LoadError, NackscanErrorCode, ParseError, PipelineError, ReportError,
    SchemaError,
};
pub use loader::{CsvLoader, REQUIRED_COLUMNS};
pub use records::{RawRecord, RecordNormalizer, RejectionRecord};
pub use regional::{ExclusivityFinder, JurisdictionExclusives, JurisdictionMatrix};
pub use report::{available_formats, create_reporter, Reporter};
