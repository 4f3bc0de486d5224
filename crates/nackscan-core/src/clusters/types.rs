//! Cluster types and the summary row contract.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bundles::{Bundle, BundleKey};

/// Ordering discipline for signature construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureOrdering {
    /// Errors joined in original occurrence order; sequence matters.
    Ordered,
    /// Sorted, deduplicated errors joined as a set key.
    #[default]
    Unordered,
}

impl fmt::Display for SignatureOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordered => write!(f, "ordered"),
            Self::Unordered => write!(f, "unordered"),
        }
    }
}

/// How bundle signatures are constructed for clustering.
///
/// Two modes with the same error part can still split bundles differently
/// once NACK types or the jurisdiction are appended, so the mode travels
/// with every report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureMode {
    pub ordering: SignatureOrdering,
    /// Append the NACK-type part to the cluster key.
    pub include_nack_types: bool,
    /// Append the jurisdiction qualifier to the cluster key.
    pub split_by_jurisdiction: bool,
}

impl fmt::Display for SignatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ordering)?;
        if self.include_nack_types {
            write!(f, "+nack-types")?;
        }
        if self.split_by_jurisdiction {
            write!(f, "+jurisdiction")?;
        }
        Ok(())
    }
}

/// Frequency counter with sum-merge semantics.
///
/// Backed by a `BTreeMap` so iteration order is deterministic. Merging is
/// associative and commutative, which keeps partitioned runs combinable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMap(BTreeMap<String, u64>);

impl CountMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: &str, count: u64) {
        *self.0.entry(key.to_string()).or_insert(0) += count;
    }

    /// Sums counts from `other` into `self`, key by key.
    pub fn merge(&mut self, other: &CountMap) {
        for (key, count) in &other.0 {
            self.add(key, *count);
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Pairs sorted count-descending, ties broken key-ascending.
    pub fn sorted_desc(&self) -> Vec<(String, u64)> {
        let mut pairs: Vec<(String, u64)> =
            self.0.iter().map(|(k, v)| (k.clone(), *v)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs
    }
}

/// Accumulating cluster state for one canonical signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub signature: String,
    /// Member `(uti_id, fo_message_id)` pairs; distinct by construction.
    pub bundle_keys: BTreeSet<BundleKey>,
    pub uti_ids: BTreeSet<String>,
    pub jurisdiction_counts: CountMap,
    pub month_counts: CountMap,
    pub product_counts: CountMap,
    pub fo_systems: BTreeSet<String>,
    pub asset_classes: BTreeSet<String>,
    pub error_descriptions: BTreeSet<String>,
    pub nack_types: BTreeSet<String>,
}

impl Cluster {
    pub fn new(signature: &str) -> Self {
        Self {
            signature: signature.to_string(),
            bundle_keys: BTreeSet::new(),
            uti_ids: BTreeSet::new(),
            jurisdiction_counts: CountMap::new(),
            month_counts: CountMap::new(),
            product_counts: CountMap::new(),
            fo_systems: BTreeSet::new(),
            asset_classes: BTreeSet::new(),
            error_descriptions: BTreeSet::new(),
            nack_types: BTreeSet::new(),
        }
    }

    /// Folds one member bundle into the cluster.
    pub fn absorb(&mut self, bundle: &Bundle) {
        self.uti_ids.insert(bundle.key.uti_id.clone());
        self.bundle_keys.insert(bundle.key.clone());
        self.jurisdiction_counts.increment(&bundle.jurisdiction);
        self.month_counts.increment(&bundle.month);
        self.product_counts.increment(&bundle.product_type);
        self.fo_systems.extend(bundle.fo_systems.iter().cloned());
        self.asset_classes.extend(bundle.asset_classes.iter().cloned());
        self.error_descriptions
            .extend(bundle.unordered_errors.iter().cloned());
        self.nack_types
            .extend(bundle.unordered_nack_types.iter().cloned());
    }

    /// Sums and unions `other` into `self`. Both sides must carry the same
    /// signature for the result to be meaningful.
    pub fn merge(&mut self, other: &Cluster) {
        self.bundle_keys.extend(other.bundle_keys.iter().cloned());
        self.uti_ids.extend(other.uti_ids.iter().cloned());
        self.jurisdiction_counts.merge(&other.jurisdiction_counts);
        self.month_counts.merge(&other.month_counts);
        self.product_counts.merge(&other.product_counts);
        self.fo_systems.extend(other.fo_systems.iter().cloned());
        self.asset_classes.extend(other.asset_classes.iter().cloned());
        self.error_descriptions
            .extend(other.error_descriptions.iter().cloned());
        self.nack_types.extend(other.nack_types.iter().cloned());
    }

    /// Distinct UTIs across member bundles.
    pub fn unique_uti_ids(&self) -> usize {
        self.uti_ids.len()
    }

    /// Distinct `(uti_id, fo_message_id)` pairs across member bundles.
    ///
    /// Pair-qualified on purpose: message ids can be reused across UTIs,
    /// and per-cluster counts must always sum to the number of distinct
    /// pairs in the input.
    pub fn unique_fo_message_ids(&self) -> usize {
        self.bundle_keys.len()
    }
}

/// One finalized row of the cluster summary table.
///
/// Serialized field names are the published report contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummaryRow {
    /// Short display id derived from the signature; identity stays with
    /// the signature string itself.
    #[serde(rename = "Cluster_Id")]
    pub cluster_id: String,
    #[serde(rename = "Cluster")]
    pub signature: String,
    #[serde(rename = "Total_Unique_Uti_Ids")]
    pub total_unique_uti_ids: usize,
    #[serde(rename = "Total_Unique_Fo_Message_Ids")]
    pub total_unique_fo_message_ids: usize,
    /// Distinct error descriptions across member bundles.
    #[serde(rename = "Number_of_Errors")]
    pub number_of_errors: usize,
    /// Distinct NACK types across member bundles.
    #[serde(rename = "Number_of_NACK_Types")]
    pub number_of_nack_types: usize,
    /// Bundle counts per jurisdiction, count-desc then key-asc.
    #[serde(rename = "JUR_Breakdown")]
    pub jur_breakdown: Vec<(String, u64)>,
    /// Bundle counts per month label, chronological.
    #[serde(rename = "Month_Breakdown")]
    pub month_breakdown: Vec<(String, u64)>,
    /// Bundle counts per product type, count-desc then key-asc.
    #[serde(rename = "Product_Breakdown")]
    pub product_breakdown: Vec<(String, u64)>,
    /// Sorted union of contributing FO systems.
    #[serde(rename = "FO_Systems")]
    pub fo_systems: Vec<String>,
    /// Sorted union of contributing asset classes.
    #[serde(rename = "Asset_Classes")]
    pub asset_classes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_map_increments_and_sums() {
        let mut counts = CountMap::new();
        counts.increment("EMIR");
        counts.increment("EMIR");
        counts.increment("CFTC");
        assert_eq!(counts.get("EMIR"), 2);
        assert_eq!(counts.get("CFTC"), 1);
        assert_eq!(counts.get("ASIC"), 0);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn count_map_merge_sums_key_by_key() {
        let mut a = CountMap::new();
        a.add("EMIR", 2);
        a.add("CFTC", 1);
        let mut b = CountMap::new();
        b.add("EMIR", 3);
        b.add("ASIC", 5);
        a.merge(&b);
        assert_eq!(a.get("EMIR"), 5);
        assert_eq!(a.get("CFTC"), 1);
        assert_eq!(a.get("ASIC"), 5);
    }

    #[test]
    fn sorted_desc_breaks_ties_lexically() {
        let mut counts = CountMap::new();
        counts.add("UK", 2);
        counts.add("EU", 2);
        counts.add("US", 7);
        assert_eq!(
            counts.sorted_desc(),
            vec![
                ("US".to_string(), 7),
                ("EU".to_string(), 2),
                ("UK".to_string(), 2),
            ]
        );
    }

    #[test]
    fn mode_display_names_active_options() {
        let mode = SignatureMode::default();
        assert_eq!(mode.to_string(), "unordered");
        let mode = SignatureMode {
            ordering: SignatureOrdering::Ordered,
            include_nack_types: true,
            split_by_jurisdiction: true,
        };
        assert_eq!(mode.to_string(), "ordered+nack-types+jurisdiction");
    }
}
