//! Bundle types: one bundle per `(uti_id, fo_message_id)` pair.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Separator for the ordered error/NACK sequence.
pub const ORDERED_SEPARATOR: &str = " -> ";
/// Separator for the unordered, deduplicated parts.
pub const UNORDERED_SEPARATOR: &str = ", ";

/// Grouping key: one trade, one front-office message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BundleKey {
    pub uti_id: String,
    pub fo_message_id: String,
}

/// All rejection rows sharing one `(uti_id, fo_message_id)` pair, with the
/// error sequence captured both in row order and as a sorted set.
///
/// Most rejections carry one or two errors, so the sequences are
/// stack-allocated up to four entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub key: BundleKey,
    /// Error descriptions in original row order, duplicates kept.
    pub ordered_errors: SmallVec<[String; 4]>,
    /// Sorted, deduplicated error descriptions.
    pub unordered_errors: SmallVec<[String; 4]>,
    /// NACK types in original row order, duplicates kept.
    pub ordered_nack_types: SmallVec<[String; 4]>,
    /// Sorted, deduplicated NACK types.
    pub unordered_nack_types: SmallVec<[String; 4]>,
    /// Number of rows collapsed into this bundle.
    pub record_count: usize,
    /// First-seen jurisdiction; constant within a bundle in clean data.
    pub jurisdiction: String,
    /// First-seen month label.
    pub month: String,
    /// First-seen product type.
    pub product_type: String,
    /// Union of FO systems across the bundle's rows.
    pub fo_systems: BTreeSet<String>,
    /// Union of asset classes across the bundle's rows.
    pub asset_classes: BTreeSet<String>,
}

impl Bundle {
    /// Errors joined in occurrence order: `"ErrA -> ErrB"`.
    pub fn ordered_error_part(&self) -> String {
        self.ordered_errors.join(ORDERED_SEPARATOR)
    }

    /// Deduplicated errors joined as a set key: `"ErrA, ErrB"`.
    pub fn unordered_error_part(&self) -> String {
        self.unordered_errors.join(UNORDERED_SEPARATOR)
    }

    pub fn ordered_nack_part(&self) -> String {
        self.ordered_nack_types.join(ORDERED_SEPARATOR)
    }

    pub fn unordered_nack_part(&self) -> String {
        self.unordered_nack_types.join(UNORDERED_SEPARATOR)
    }
}
