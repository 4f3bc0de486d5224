//! Bundle construction: partitions records by `(uti_id, fo_message_id)`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::types::{Bundle, BundleKey};
use crate::records::RejectionRecord;

/// Partitions normalized records into bundles.
///
/// Partition order follows first appearance in the input; rows within a
/// partition keep their original relative order.
pub struct BundleBuilder;

impl BundleBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, records: &[RejectionRecord]) -> Vec<Bundle> {
        let mut order: Vec<BundleKey> = Vec::new();
        let mut partitions: FxHashMap<BundleKey, Vec<&RejectionRecord>> = FxHashMap::default();

        for record in records {
            let key = BundleKey {
                uti_id: record.uti_id.clone(),
                fo_message_id: record.fo_message_id.clone(),
            };
            let rows = partitions.entry(key.clone()).or_default();
            if rows.is_empty() {
                order.push(key);
            }
            rows.push(record);
        }

        let bundles: Vec<Bundle> = order
            .into_iter()
            .filter_map(|key| {
                let rows = partitions.remove(&key)?;
                build_bundle(key, &rows)
            })
            .collect();

        debug!(
            records = records.len(),
            bundles = bundles.len(),
            "Built bundles"
        );
        bundles
    }
}

impl Default for BundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_bundle(key: BundleKey, rows: &[&RejectionRecord]) -> Option<Bundle> {
    let first = rows.first()?;

    if rows.iter().any(|r| r.jurisdiction != first.jurisdiction) {
        warn!(
            uti = %key.uti_id,
            message = %key.fo_message_id,
            "Bundle spans multiple jurisdictions; keeping first-seen"
        );
    }

    let ordered_errors: SmallVec<[String; 4]> =
        rows.iter().map(|r| r.error_description.clone()).collect();
    let ordered_nack_types: SmallVec<[String; 4]> =
        rows.iter().map(|r| r.nack_type.clone()).collect();

    Some(Bundle {
        unordered_errors: sorted_dedup(&ordered_errors),
        unordered_nack_types: sorted_dedup(&ordered_nack_types),
        ordered_errors,
        ordered_nack_types,
        record_count: rows.len(),
        jurisdiction: first.jurisdiction.clone(),
        month: first.month.clone(),
        product_type: first.product_type.clone(),
        fo_systems: rows.iter().map(|r| r.fo_system.clone()).collect(),
        asset_classes: rows.iter().map(|r| r.asset_class.clone()).collect(),
        key,
    })
}

fn sorted_dedup(values: &[String]) -> SmallVec<[String; 4]> {
    let mut out: SmallVec<[String; 4]> = values.iter().cloned().collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::records::month_label;

    fn record(uti: &str, msg: &str, error: &str, nack: &str) -> RejectionRecord {
        let snapshot_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        RejectionRecord {
            uti_id: uti.into(),
            fo_message_id: msg.into(),
            error_description: error.into(),
            nack_type: nack.into(),
            jurisdiction: "EMIR".into(),
            month: month_label(snapshot_date),
            snapshot_date,
            fo_system: "Murex".into(),
            asset_class: "Rates".into(),
            product_type: "Swap".into(),
        }
    }

    #[test]
    fn groups_by_uti_and_message_pair() {
        let records = vec![
            record("T1", "M1", "ErrA", "NACK1"),
            record("T1", "M2", "ErrA", "NACK1"),
            record("T2", "M1", "ErrB", "NACK2"),
        ];
        let bundles = BundleBuilder::new().build(&records);
        assert_eq!(bundles.len(), 3);
        assert!(bundles.iter().all(|b| b.record_count == 1));
    }

    #[test]
    fn ordered_part_keeps_row_order_and_duplicates() {
        let records = vec![
            record("T1", "M1", "ErrB", "NACK1"),
            record("T1", "M1", "ErrA", "NACK1"),
            record("T1", "M1", "ErrB", "NACK2"),
        ];
        let bundles = BundleBuilder::new().build(&records);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].ordered_error_part(), "ErrB -> ErrA -> ErrB");
        assert_eq!(bundles[0].unordered_error_part(), "ErrA, ErrB");
        assert_eq!(bundles[0].ordered_nack_part(), "NACK1 -> NACK1 -> NACK2");
        assert_eq!(bundles[0].unordered_nack_part(), "NACK1, NACK2");
        assert_eq!(bundles[0].record_count, 3);
    }

    #[test]
    fn two_error_bundle_matches_published_example() {
        let records = vec![
            record("T1", "M1", "ErrA", "NACK1"),
            record("T1", "M1", "ErrB", "NACK1"),
        ];
        let bundles = BundleBuilder::new().build(&records);
        assert_eq!(bundles[0].ordered_error_part(), "ErrA -> ErrB");
        assert_eq!(bundles[0].unordered_error_part(), "ErrA, ErrB");
    }

    #[test]
    fn partition_order_is_first_appearance() {
        let records = vec![
            record("T2", "M9", "ErrA", "NACK1"),
            record("T1", "M1", "ErrB", "NACK1"),
            record("T2", "M9", "ErrC", "NACK1"),
        ];
        let bundles = BundleBuilder::new().build(&records);
        assert_eq!(bundles[0].key.uti_id, "T2");
        assert_eq!(bundles[1].key.uti_id, "T1");
    }

    #[test]
    fn unions_systems_and_asset_classes() {
        let mut a = record("T1", "M1", "ErrA", "NACK1");
        a.fo_system = "Murex".into();
        a.asset_class = "Rates".into();
        let mut b = record("T1", "M1", "ErrB", "NACK1");
        b.fo_system = "Calypso".into();
        b.asset_class = "Credit".into();

        let bundles = BundleBuilder::new().build(&[a, b]);
        let systems: Vec<&str> = bundles[0].fo_systems.iter().map(String::as_str).collect();
        assert_eq!(systems, vec!["Calypso", "Murex"]);
        let classes: Vec<&str> = bundles[0].asset_classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["Credit", "Rates"]);
    }

    #[test]
    fn empty_input_builds_no_bundles() {
        assert!(BundleBuilder::new().build(&[]).is_empty());
    }
}
