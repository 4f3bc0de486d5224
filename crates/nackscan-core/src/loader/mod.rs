//! CSV ingestion.

pub mod csv_loader;

pub use csv_loader::{CsvLoader, OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
