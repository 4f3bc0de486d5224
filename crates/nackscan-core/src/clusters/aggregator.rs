//! Cluster aggregation: groups bundles by canonical signature.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::signature::{build_signature, cluster_id};
use super::types::{Cluster, ClusterSummaryRow, CountMap, SignatureMode};
use crate::bundles::Bundle;
use crate::records::parse_month_label;

/// Groups bundles into clusters and finalizes the sorted summary table.
pub struct ClusterAggregator {
    mode: SignatureMode,
    /// Clusters with fewer member bundles are dropped from the summary.
    min_bundles: usize,
}

impl ClusterAggregator {
    pub fn new(mode: SignatureMode) -> Self {
        Self {
            mode,
            min_bundles: 1,
        }
    }

    pub fn with_min_bundles(mode: SignatureMode, min_bundles: usize) -> Self {
        Self { mode, min_bundles }
    }

    pub fn mode(&self) -> SignatureMode {
        self.mode
    }

    /// Groups bundles by signature. Every bundle lands in exactly one
    /// cluster; clusters come back sorted by unique FO-message count
    /// descending, ties broken ascending on the signature.
    pub fn aggregate(&self, bundles: &[Bundle]) -> Vec<Cluster> {
        let mut by_signature: FxHashMap<String, Cluster> = FxHashMap::default();
        for bundle in bundles {
            let signature = build_signature(bundle, self.mode);
            by_signature
                .entry(signature.clone())
                .or_insert_with(|| Cluster::new(&signature))
                .absorb(bundle);
        }

        let mut clusters: Vec<Cluster> = by_signature.into_values().collect();
        clusters.sort_by(|a, b| {
            b.unique_fo_message_ids()
                .cmp(&a.unique_fo_message_ids())
                .then_with(|| a.signature.cmp(&b.signature))
        });

        debug!(
            bundles = bundles.len(),
            clusters = clusters.len(),
            mode = %self.mode,
            "Aggregated clusters"
        );
        clusters
    }

    /// Finalizes clusters into summary rows, keeping the aggregate sort
    /// and dropping clusters below the `min_bundles` floor.
    pub fn summarize(&self, clusters: &[Cluster]) -> Vec<ClusterSummaryRow> {
        clusters
            .iter()
            .filter(|c| c.bundle_keys.len() >= self.min_bundles)
            .map(finalize)
            .collect()
    }

    /// Aggregates and summarizes in one call.
    pub fn run(&self, bundles: &[Bundle]) -> Vec<ClusterSummaryRow> {
        self.summarize(&self.aggregate(bundles))
    }
}

fn finalize(cluster: &Cluster) -> ClusterSummaryRow {
    ClusterSummaryRow {
        cluster_id: cluster_id(&cluster.signature),
        signature: cluster.signature.clone(),
        total_unique_uti_ids: cluster.unique_uti_ids(),
        total_unique_fo_message_ids: cluster.unique_fo_message_ids(),
        number_of_errors: cluster.error_descriptions.len(),
        number_of_nack_types: cluster.nack_types.len(),
        jur_breakdown: cluster.jurisdiction_counts.sorted_desc(),
        month_breakdown: chronological(&cluster.month_counts),
        product_breakdown: cluster.product_counts.sorted_desc(),
        fo_systems: cluster.fo_systems.iter().cloned().collect(),
        asset_classes: cluster.asset_classes.iter().cloned().collect(),
    }
}

/// Month counters re-sorted chronologically, not lexically. Labels are
/// parsed back to dates for the sort key; a label that fails to parse
/// sorts after all parseable ones.
fn chronological(counts: &CountMap) -> Vec<(String, u64)> {
    let mut pairs: Vec<(String, u64)> = counts.iter().map(|(k, v)| (k.to_string(), v)).collect();
    pairs.sort_by_key(|(label, _)| match parse_month_label(label) {
        Some(date) => (0u8, date, label.clone()),
        None => (1u8, NaiveDate::MAX, label.clone()),
    });
    pairs
}
