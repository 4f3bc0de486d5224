//! Pipeline errors.

use super::error_code::NackscanErrorCode;
use super::{ConfigError, LoadError, ParseError, ReportError, SchemaError};

/// Errors that can occur during a full analysis run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl NackscanErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Load(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Schema(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}
