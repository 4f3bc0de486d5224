//! Top-level nackscan configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, LoadConfig, ReportConfig};
use crate::errors::ConfigError;
use crate::report::available_formats;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`NACKSCAN_*`)
/// 3. Project config (`nackscan.toml` in the working root)
/// 4. User config (`~/.nackscan/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NackscanConfig {
    pub analysis: AnalysisConfig,
    pub load: LoadConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ordering: Option<String>,
    pub include_nack_types: Option<bool>,
    pub split_by_jurisdiction: Option<bool>,
    pub min_bundles: Option<usize>,
    pub delimiter: Option<String>,
    pub formats: Vec<String>,
    pub out_dir: Option<String>,
    pub top: Option<usize>,
}

impl NackscanConfig {
    /// Loads configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config. An unreadable user
        // config is skipped; malformed TOML is still fatal.
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                if let Err(err) = Self::merge_toml_file(&mut config, &user_config_path) {
                    if matches!(err, ConfigError::ParseFailed { .. }) {
                        return Err(err);
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("nackscan.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Loads configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates the resolved configuration values.
    pub fn validate(config: &NackscanConfig) -> Result<(), ConfigError> {
        config.analysis.effective_ordering()?;
        config.load.effective_delimiter()?;
        for format in config.report.effective_formats() {
            if !available_formats().contains(&format.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.formats".to_string(),
                    message: format!(
                        "unknown format {format:?}, expected one of {}",
                        available_formats().join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// Merges a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut NackscanConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: NackscanConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merges `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut NackscanConfig, other: &NackscanConfig) {
        // Analysis
        if other.analysis.ordering.is_some() {
            base.analysis.ordering = other.analysis.ordering.clone();
        }
        if other.analysis.include_nack_types.is_some() {
            base.analysis.include_nack_types = other.analysis.include_nack_types;
        }
        if other.analysis.split_by_jurisdiction.is_some() {
            base.analysis.split_by_jurisdiction = other.analysis.split_by_jurisdiction;
        }
        if other.analysis.min_bundles.is_some() {
            base.analysis.min_bundles = other.analysis.min_bundles;
        }

        // Load
        if other.load.delimiter.is_some() {
            base.load.delimiter = other.load.delimiter.clone();
        }
        if !other.load.date_formats.is_empty() {
            base.load.date_formats = other.load.date_formats.clone();
        }

        // Report
        if !other.report.formats.is_empty() {
            base.report.formats = other.report.formats.clone();
        }
        if other.report.out_dir.is_some() {
            base.report.out_dir = other.report.out_dir.clone();
        }
        if other.report.top.is_some() {
            base.report.top = other.report.top;
        }
    }

    /// Applies environment variable overrides.
    /// Pattern: `NACKSCAN_ANALYSIS_ORDERING`, `NACKSCAN_REPORT_OUT_DIR`, etc.
    fn apply_env_overrides(config: &mut NackscanConfig) {
        if let Ok(val) = std::env::var("NACKSCAN_ANALYSIS_ORDERING") {
            config.analysis.ordering = Some(val);
        }
        if let Ok(val) = std::env::var("NACKSCAN_ANALYSIS_INCLUDE_NACK_TYPES") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.include_nack_types = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NACKSCAN_ANALYSIS_SPLIT_BY_JURISDICTION") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.split_by_jurisdiction = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NACKSCAN_ANALYSIS_MIN_BUNDLES") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.min_bundles = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NACKSCAN_LOAD_DELIMITER") {
            config.load.delimiter = Some(val);
        }
        if let Ok(val) = std::env::var("NACKSCAN_REPORT_FORMATS") {
            let formats: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if !formats.is_empty() {
                config.report.formats = formats;
            }
        }
        if let Ok(val) = std::env::var("NACKSCAN_REPORT_OUT_DIR") {
            config.report.out_dir = Some(val);
        }
        if let Ok(val) = std::env::var("NACKSCAN_REPORT_TOP") {
            if let Ok(v) = val.parse::<usize>() {
                config.report.top = Some(v);
            }
        }
    }

    /// Applies CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut NackscanConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.ordering {
            config.analysis.ordering = Some(v.clone());
        }
        if let Some(v) = cli.include_nack_types {
            config.analysis.include_nack_types = Some(v);
        }
        if let Some(v) = cli.split_by_jurisdiction {
            config.analysis.split_by_jurisdiction = Some(v);
        }
        if let Some(v) = cli.min_bundles {
            config.analysis.min_bundles = Some(v);
        }
        if let Some(ref v) = cli.delimiter {
            config.load.delimiter = Some(v.clone());
        }
        if !cli.formats.is_empty() {
            config.report.formats = cli.formats.clone();
        }
        if let Some(ref v) = cli.out_dir {
            config.report.out_dir = Some(v.clone());
        }
        if let Some(v) = cli.top {
            config.report.top = Some(v);
        }
    }

    /// Serializes the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user config path: `~/.nackscan/config.toml`.
fn user_config_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".nackscan").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
