//! CSV ingestion with header validation.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::errors::{LoadError, SchemaError};
use crate::records::RawRecord;

/// Columns that must be present in the input header.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "uti_id",
    "fo_message_id",
    "error_description",
    "nack_type",
    "jurisdiction",
    "snapshot_date",
    "fo_system",
    "asset_class",
];

/// Optional columns recognized in the input header.
pub const OPTIONAL_COLUMNS: &[&str] = &["product_type"];

/// Reads rejection rows from CSV input.
///
/// Validates the header before touching any data row and reports every
/// missing required column at once. Unknown columns are ignored; a file
/// with a valid header and no data rows loads as zero records.
pub struct CsvLoader {
    delimiter: u8,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Loads raw records from a file path.
    pub fn load_path(&self, path: &Path) -> Result<Vec<RawRecord>, LoadError> {
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: label.clone(),
            source,
        })?;
        self.read_from(file, &label)
    }

    /// Loads raw records from any reader. Errors name the source `<input>`.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<RawRecord>, LoadError> {
        self.read_from(reader, "<input>")
    }

    fn read_from<R: Read>(&self, reader: R, label: &str) -> Result<Vec<RawRecord>, LoadError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|source| LoadError::Csv {
                path: label.to_string(),
                source,
            })?
            .clone();
        validate_header(&headers)?;

        let mut rows = Vec::new();
        for result in csv_reader.deserialize() {
            let row: RawRecord = result.map_err(|source| LoadError::Csv {
                path: label.to_string(),
                source,
            })?;
            rows.push(row);
        }

        debug!(rows = rows.len(), source = label, "Loaded raw rejection rows");
        Ok(rows)
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_header(headers: &StringRecord) -> Result<(), SchemaError> {
    if headers.is_empty() {
        return Err(SchemaError::EmptyHeader);
    }
    let present: HashSet<&str> = headers.iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !present.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns { columns: missing });
    }

    let unknown: Vec<&str> = headers
        .iter()
        .filter(|name| !REQUIRED_COLUMNS.contains(name) && !OPTIONAL_COLUMNS.contains(name))
        .collect();
    if !unknown.is_empty() {
        debug!(columns = ?unknown, "Ignoring unrecognized header columns");
    }
    Ok(())
}
