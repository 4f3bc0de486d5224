//! Canonical signature construction.

use xxhash_rust::xxh3::xxh3_64;

use super::types::{SignatureMode, SignatureOrdering};
use crate::bundles::Bundle;

/// Separator between the error part and the NACK-type part.
pub const NACK_SEPARATOR: &str = " | ";
/// Separator before the jurisdiction qualifier.
pub const JURISDICTION_SEPARATOR: &str = " @ ";

/// Builds the canonical cluster signature for a bundle under `mode`.
///
/// Cluster membership is decided by string equality of this value alone,
/// so the separators are fixed and the parts are appended in a fixed
/// order: errors, then NACK types, then jurisdiction.
pub fn build_signature(bundle: &Bundle, mode: SignatureMode) -> String {
    let mut signature = match mode.ordering {
        SignatureOrdering::Ordered => bundle.ordered_error_part(),
        SignatureOrdering::Unordered => bundle.unordered_error_part(),
    };
    if mode.include_nack_types {
        let nack_part = match mode.ordering {
            SignatureOrdering::Ordered => bundle.ordered_nack_part(),
            SignatureOrdering::Unordered => bundle.unordered_nack_part(),
        };
        signature.push_str(NACK_SEPARATOR);
        signature.push_str(&nack_part);
    }
    if mode.split_by_jurisdiction {
        signature.push_str(JURISDICTION_SEPARATOR);
        signature.push_str(&bundle.jurisdiction);
    }
    signature
}

/// Short stable display id for a signature, 16 hex characters.
pub fn cluster_id(signature: &str) -> String {
    format!("{:016x}", xxh3_64(signature.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::bundles::BundleKey;

    fn bundle(ordered: &[&str], nacks: &[&str], jurisdiction: &str) -> Bundle {
        let ordered_errors: smallvec::SmallVec<[String; 4]> =
            ordered.iter().map(|s| s.to_string()).collect();
        let mut unordered_errors = ordered_errors.clone();
        unordered_errors.sort();
        unordered_errors.dedup();
        let ordered_nack_types: smallvec::SmallVec<[String; 4]> =
            nacks.iter().map(|s| s.to_string()).collect();
        let mut unordered_nack_types = ordered_nack_types.clone();
        unordered_nack_types.sort();
        unordered_nack_types.dedup();
        Bundle {
            key: BundleKey {
                uti_id: "T1".into(),
                fo_message_id: "M1".into(),
            },
            record_count: ordered_errors.len(),
            ordered_errors,
            unordered_errors,
            ordered_nack_types,
            unordered_nack_types,
            jurisdiction: jurisdiction.into(),
            month: "Jan-2024".into(),
            product_type: "Swap".into(),
            fo_systems: BTreeSet::new(),
            asset_classes: BTreeSet::new(),
        }
    }

    #[test]
    fn ordered_and_unordered_parts() {
        let b = bundle(&["ErrB", "ErrA", "ErrB"], &["NACK1"], "US");
        let ordered = build_signature(
            &b,
            SignatureMode {
                ordering: SignatureOrdering::Ordered,
                ..Default::default()
            },
        );
        assert_eq!(ordered, "ErrB -> ErrA -> ErrB");
        let unordered = build_signature(&b, SignatureMode::default());
        assert_eq!(unordered, "ErrA, ErrB");
    }

    #[test]
    fn nack_part_appends_with_pipe_separator() {
        let b = bundle(&["ErrA", "ErrB"], &["NACK2", "NACK1"], "US");
        let mode = SignatureMode {
            include_nack_types: true,
            ..Default::default()
        };
        assert_eq!(build_signature(&b, mode), "ErrA, ErrB | NACK1, NACK2");

        let mode = SignatureMode {
            ordering: SignatureOrdering::Ordered,
            include_nack_types: true,
            ..Default::default()
        };
        assert_eq!(build_signature(&b, mode), "ErrA -> ErrB | NACK2 -> NACK1");
    }

    #[test]
    fn jurisdiction_qualifier_appends_last() {
        let b = bundle(&["ErrA"], &["NACK1"], "EMIR");
        let mode = SignatureMode {
            include_nack_types: true,
            split_by_jurisdiction: true,
            ..Default::default()
        };
        assert_eq!(build_signature(&b, mode), "ErrA | NACK1 @ EMIR");
    }

    #[test]
    fn single_error_signature_is_bare_description() {
        let b = bundle(&["ErrA"], &["NACK1"], "US");
        assert_eq!(build_signature(&b, SignatureMode::default()), "ErrA");
    }

    #[test]
    fn cluster_id_is_stable_and_short() {
        let a = cluster_id("ErrA, ErrB");
        let b = cluster_id("ErrA, ErrB");
        let c = cluster_id("ErrA -> ErrB");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
