//! Clustering: canonical signatures and per-cluster statistics.

pub mod aggregator;
pub mod signature;
pub mod types;

pub use aggregator::ClusterAggregator;
pub use signature::{build_signature, cluster_id, JURISDICTION_SEPARATOR, NACK_SEPARATOR};
pub use types::{Cluster, ClusterSummaryRow, CountMap, SignatureMode, SignatureOrdering};
