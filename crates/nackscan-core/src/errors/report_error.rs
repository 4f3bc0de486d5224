//! Report rendering errors.

use super::error_code::{self, NackscanErrorCode};

/// Errors raised while rendering analysis results.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown report format {0:?}")]
    UnknownFormat(String),

    #[error("Report serialization failed: {0}")]
    Serialize(String),
}

impl NackscanErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
