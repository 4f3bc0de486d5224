//! Ingestion configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::records::DATE_FORMATS;

/// Configuration for CSV ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoadConfig {
    /// Field delimiter, a single ASCII character. Default: `","`.
    pub delimiter: Option<String>,
    /// Snapshot-date formats tried in order. Empty means the built-in list.
    #[serde(default)]
    pub date_formats: Vec<String>,
}

impl LoadConfig {
    /// Returns the effective delimiter byte, defaulting to a comma.
    pub fn effective_delimiter(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_deref() {
            None => Ok(b','),
            Some(value) => {
                let mut bytes = value.bytes();
                match (bytes.next(), bytes.next()) {
                    (Some(b), None) if b.is_ascii() => Ok(b),
                    _ => Err(ConfigError::ValidationFailed {
                        field: "load.delimiter".to_string(),
                        message: format!("{value:?} is not a single ASCII character"),
                    }),
                }
            }
        }
    }

    /// Returns the effective date format list.
    pub fn effective_date_formats(&self) -> Vec<String> {
        if self.date_formats.is_empty() {
            DATE_FORMATS.iter().map(|f| f.to_string()).collect()
        } else {
            self.date_formats.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delimiter_is_comma() {
        assert_eq!(LoadConfig::default().effective_delimiter().unwrap(), b',');
    }

    #[test]
    fn single_character_delimiter_is_accepted() {
        let config = LoadConfig {
            delimiter: Some(";".into()),
            ..Default::default()
        };
        assert_eq!(config.effective_delimiter().unwrap(), b';');
    }

    #[test]
    fn multi_character_delimiter_is_rejected() {
        let config = LoadConfig {
            delimiter: Some("||".into()),
            ..Default::default()
        };
        assert!(config.effective_delimiter().is_err());
        let config = LoadConfig {
            delimiter: Some("".into()),
            ..Default::default()
        };
        assert!(config.effective_delimiter().is_err());
    }

    #[test]
    fn empty_date_formats_fall_back_to_builtin() {
        let formats = LoadConfig::default().effective_date_formats();
        assert_eq!(formats.len(), DATE_FORMATS.len());
        assert_eq!(formats[0], "%Y-%m-%d");
    }
}
