//! Record normalization errors.

use super::error_code::{self, NackscanErrorCode};

/// Errors raised while coercing raw input rows into typed records.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unparseable snapshot date {value:?} at row {row}")]
    InvalidDate { value: String, row: usize },

    #[error("Required field `{field}` is empty at row {row}")]
    MissingField { field: &'static str, row: usize },
}

impl NackscanErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
