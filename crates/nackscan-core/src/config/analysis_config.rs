//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::clusters::{SignatureMode, SignatureOrdering};
use crate::errors::ConfigError;

/// Configuration for the clustering subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Signature ordering: `"ordered"` or `"unordered"`. Default: unordered.
    pub ordering: Option<String>,
    /// Append NACK types to the cluster key. Default: false.
    pub include_nack_types: Option<bool>,
    /// Append the jurisdiction to the cluster key. Default: false.
    pub split_by_jurisdiction: Option<bool>,
    /// Minimum member bundles for a cluster to appear in the summary.
    /// Default: 1 (keep everything).
    pub min_bundles: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective signature ordering, defaulting to unordered.
    pub fn effective_ordering(&self) -> Result<SignatureOrdering, ConfigError> {
        match self.ordering.as_deref() {
            None => Ok(SignatureOrdering::Unordered),
            Some("ordered") => Ok(SignatureOrdering::Ordered),
            Some("unordered") => Ok(SignatureOrdering::Unordered),
            Some(other) => Err(ConfigError::ValidationFailed {
                field: "analysis.ordering".to_string(),
                message: format!("unknown ordering {other:?}, expected ordered or unordered"),
            }),
        }
    }

    /// Returns the effective minimum bundle floor, defaulting to 1.
    pub fn effective_min_bundles(&self) -> usize {
        self.min_bundles.unwrap_or(1).max(1)
    }

    /// Resolves the full signature mode.
    pub fn signature_mode(&self) -> Result<SignatureMode, ConfigError> {
        Ok(SignatureMode {
            ordering: self.effective_ordering()?,
            include_nack_types: self.include_nack_types.unwrap_or(false),
            split_by_jurisdiction: self.split_by_jurisdiction.unwrap_or(false),
        })
    }
}
