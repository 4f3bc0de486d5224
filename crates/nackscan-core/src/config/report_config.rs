//! Report configuration.

use serde::{Deserialize, Serialize};

/// Configuration for report rendering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Formats to produce. Default: `["console"]`.
    #[serde(default)]
    pub formats: Vec<String>,
    /// Directory written reports land in. Default: `"reports"`.
    pub out_dir: Option<String>,
    /// Rendered table row limit; 0 keeps every row. Default: 0.
    pub top: Option<usize>,
}

impl ReportConfig {
    /// Returns the effective format list, defaulting to console only.
    pub fn effective_formats(&self) -> Vec<String> {
        if self.formats.is_empty() {
            vec!["console".to_string()]
        } else {
            self.formats.clone()
        }
    }

    /// Returns the effective output directory.
    pub fn effective_out_dir(&self) -> String {
        self.out_dir.clone().unwrap_or_else(|| "reports".to_string())
    }

    /// Returns the effective row limit; 0 means unlimited.
    pub fn effective_top(&self) -> usize {
        self.top.unwrap_or(0)
    }
}
