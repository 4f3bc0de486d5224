//! Region-exclusive cluster detection.

use tracing::debug;

use super::types::{JurisdictionExclusives, JurisdictionMatrix, TOTAL_LABEL};
use crate::bundles::Bundle;
use crate::clusters::{build_signature, SignatureMode};

/// Detects clusters that occur in exactly one jurisdiction.
pub struct ExclusivityFinder;

impl ExclusivityFinder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the signature × jurisdiction matrix from bundles.
    ///
    /// The jurisdiction qualifier is stripped from the row signature even
    /// when the clustering mode carries it; a qualified signature would be
    /// exclusive to its own jurisdiction by construction.
    pub fn build_matrix(&self, bundles: &[Bundle], mode: SignatureMode) -> JurisdictionMatrix {
        let row_mode = SignatureMode {
            split_by_jurisdiction: false,
            ..mode
        };
        let mut matrix = JurisdictionMatrix::new();
        for bundle in bundles {
            matrix.record(&build_signature(bundle, row_mode), &bundle.jurisdiction);
        }
        matrix
    }

    /// Returns, per jurisdiction, the signatures exclusive to it.
    ///
    /// Exclusive means a positive count in that jurisdiction and zero in
    /// every other. Requires at least two jurisdictions; with fewer the
    /// result is empty because exclusivity is not meaningful. A literal
    /// `"Total"` column never participates in the comparison.
    pub fn find(&self, matrix: &JurisdictionMatrix) -> Vec<JurisdictionExclusives> {
        let jurisdictions: Vec<&str> = matrix
            .jurisdictions()
            .filter(|j| *j != TOTAL_LABEL)
            .collect();
        if jurisdictions.len() < 2 {
            return Vec::new();
        }

        let mut results = Vec::new();
        for &jurisdiction in &jurisdictions {
            let signatures: Vec<String> = matrix
                .signatures()
                .filter(|&signature| {
                    matrix.count(signature, jurisdiction) > 0
                        && jurisdictions.iter().all(|&other| {
                            other == jurisdiction || matrix.count(signature, other) == 0
                        })
                })
                .map(str::to_string)
                .collect();
            if !signatures.is_empty() {
                results.push(JurisdictionExclusives {
                    jurisdiction: jurisdiction.to_string(),
                    signatures,
                });
            }
        }

        debug!(
            jurisdictions = jurisdictions.len(),
            exclusive_sets = results.len(),
            "Computed region-exclusive clusters"
        );
        results
    }
}

impl Default for ExclusivityFinder {
    fn default() -> Self {
        Self::new()
    }
}
