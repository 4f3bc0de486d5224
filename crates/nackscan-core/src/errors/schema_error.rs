//! Input schema errors.

use super::error_code::{self, NackscanErrorCode};

/// Errors raised while validating the input header.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Lists every missing required column, not just the first.
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Input has no header row")]
    EmptyHeader,
}

impl NackscanErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_ERROR
    }
}
