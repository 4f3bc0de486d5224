//! Jurisdiction occurrence matrix and exclusivity results.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Label for rendered margin rows and columns. Renderers may add margins
/// under this label; exclusivity comparisons never look at it.
pub const TOTAL_LABEL: &str = "Total";

/// Signature × jurisdiction occurrence counts.
///
/// Counts are bundle occurrences, the same unit the cluster summary uses.
/// Margins are computed on demand rather than stored, so the matrix itself
/// only ever holds real jurisdictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionMatrix {
    cells: BTreeMap<String, BTreeMap<String, u64>>,
    jurisdictions: BTreeSet<String>,
}

impl JurisdictionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, signature: &str, jurisdiction: &str) {
        self.add(signature, jurisdiction, 1);
    }

    pub fn add(&mut self, signature: &str, jurisdiction: &str, count: u64) {
        *self
            .cells
            .entry(signature.to_string())
            .or_default()
            .entry(jurisdiction.to_string())
            .or_insert(0) += count;
        self.jurisdictions.insert(jurisdiction.to_string());
    }

    pub fn count(&self, signature: &str, jurisdiction: &str) -> u64 {
        self.cells
            .get(signature)
            .and_then(|row| row.get(jurisdiction))
            .copied()
            .unwrap_or(0)
    }

    /// Jurisdiction columns in sorted order.
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> + '_ {
        self.jurisdictions.iter().map(String::as_str)
    }

    /// Signature rows in sorted order.
    pub fn signatures(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    pub fn row_total(&self, signature: &str) -> u64 {
        self.cells
            .get(signature)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, jurisdiction: &str) -> u64 {
        self.cells
            .values()
            .filter_map(|row| row.get(jurisdiction))
            .sum()
    }

    pub fn grand_total(&self) -> u64 {
        self.cells.values().flat_map(|row| row.values()).sum()
    }

    pub fn jurisdiction_count(&self) -> usize {
        self.jurisdictions.len()
    }

    pub fn signature_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Signatures confined to a single jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionExclusives {
    pub jurisdiction: String,
    /// Signatures with a positive count here and zero everywhere else,
    /// sorted ascending.
    pub signatures: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_cell() {
        let mut matrix = JurisdictionMatrix::new();
        matrix.record("ErrA", "US");
        matrix.record("ErrA", "US");
        matrix.record("ErrA", "EU");
        matrix.record("ErrB", "EU");

        assert_eq!(matrix.count("ErrA", "US"), 2);
        assert_eq!(matrix.count("ErrA", "EU"), 1);
        assert_eq!(matrix.count("ErrB", "US"), 0);
        assert_eq!(matrix.row_total("ErrA"), 3);
        assert_eq!(matrix.column_total("EU"), 2);
        assert_eq!(matrix.grand_total(), 4);
        assert_eq!(matrix.jurisdiction_count(), 2);
        assert_eq!(matrix.signature_count(), 2);
    }

    #[test]
    fn iteration_order_is_sorted() {
        let mut matrix = JurisdictionMatrix::new();
        matrix.record("Zeta", "US");
        matrix.record("Alpha", "EU");
        let signatures: Vec<&str> = matrix.signatures().collect();
        assert_eq!(signatures, vec!["Alpha", "Zeta"]);
        let jurisdictions: Vec<&str> = matrix.jurisdictions().collect();
        assert_eq!(jurisdictions, vec!["EU", "US"]);
    }

    #[test]
    fn empty_matrix_totals_zero() {
        let matrix = JurisdictionMatrix::new();
        assert!(matrix.is_empty());
        assert_eq!(matrix.grand_total(), 0);
        assert_eq!(matrix.row_total("ErrA"), 0);
    }
}
