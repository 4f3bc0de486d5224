//! Record normalization: raw rows to validated, typed records.

use chrono::NaiveDate;
use tracing::debug;

use super::types::{month_label, RawRecord, RejectionRecord, UNKNOWN};
use crate::errors::ParseError;

/// Snapshot-date formats accepted by default, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%b-%Y"];

/// Normalizes raw input rows into validated records.
///
/// Pure transform: trims fields, collapses whitespace runs inside error
/// descriptions, coerces dates, derives month labels and defaults missing
/// product types to [`UNKNOWN`]. Fails fast on the first malformed row.
pub struct RecordNormalizer {
    formats: Vec<String>,
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self {
            formats: DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Replaces the accepted date formats. An empty list falls back to
    /// [`DATE_FORMATS`].
    pub fn with_formats(formats: &[String]) -> Self {
        if formats.is_empty() {
            return Self::new();
        }
        Self {
            formats: formats.to_vec(),
        }
    }

    /// Normalizes a batch of raw rows. Row numbers in errors are 1-based
    /// data rows, matching what a reader sees below the header.
    pub fn normalize(&self, rows: &[RawRecord]) -> Result<Vec<RejectionRecord>, ParseError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.normalize_row(row, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), "Normalized rejection rows");
        Ok(records)
    }

    fn normalize_row(
        &self,
        row: &RawRecord,
        row_number: usize,
    ) -> Result<RejectionRecord, ParseError> {
        let snapshot_date = self.parse_date(row.snapshot_date.trim(), row_number)?;
        let error_description =
            collapse_whitespace(&required(&row.error_description, "error_description", row_number)?);

        Ok(RejectionRecord {
            uti_id: required(&row.uti_id, "uti_id", row_number)?,
            fo_message_id: required(&row.fo_message_id, "fo_message_id", row_number)?,
            error_description,
            nack_type: required(&row.nack_type, "nack_type", row_number)?,
            jurisdiction: required(&row.jurisdiction, "jurisdiction", row_number)?,
            month: month_label(snapshot_date),
            snapshot_date,
            fo_system: required(&row.fo_system, "fo_system", row_number)?,
            asset_class: required(&row.asset_class, "asset_class", row_number)?,
            product_type: optional(row.product_type.as_deref()),
        })
    }

    fn parse_date(&self, value: &str, row: usize) -> Result<NaiveDate, ParseError> {
        for format in &self.formats {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Ok(date);
            }
        }
        Err(ParseError::InvalidDate {
            value: value.to_string(),
            row,
        })
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn required(value: &str, field: &'static str, row: usize) -> Result<String, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::MissingField { field, row });
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// CSV exports carry stray newlines and doubled spaces inside descriptions;
/// equal descriptions must compare equal after cleanup.
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
