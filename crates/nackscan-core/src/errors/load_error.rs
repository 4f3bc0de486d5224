//! CSV ingestion errors.

use super::error_code::{self, NackscanErrorCode};
use super::SchemaError;

/// Errors raised while reading rejection rows from CSV input.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl NackscanErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.error_code(),
            _ => error_code::LOAD_ERROR,
        }
    }
}
