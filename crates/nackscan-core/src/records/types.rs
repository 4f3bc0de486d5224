//! Rejection record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel for missing optional dimension values.
pub const UNKNOWN: &str = "Unknown";

/// One rejection row as read from the input, dates still raw strings.
/// Field names match the required input columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub uti_id: String,
    pub fo_message_id: String,
    pub error_description: String,
    pub nack_type: String,
    pub jurisdiction: String,
    pub snapshot_date: String,
    pub fo_system: String,
    pub asset_class: String,
    /// Optional column; absent values become [`UNKNOWN`] after normalization.
    #[serde(default)]
    pub product_type: Option<String>,
}

/// One validated rejection row. Immutable input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    /// Unique Trade Identifier. Identifies the trade being reported.
    pub uti_id: String,
    /// Front-office message id. One message can be rejected repeatedly.
    pub fo_message_id: String,
    /// Human-readable reason the trade repository gave for the rejection.
    pub error_description: String,
    /// Rejection category code accompanying the description.
    pub nack_type: String,
    /// Regulatory regime the submission was made under.
    pub jurisdiction: String,
    pub snapshot_date: NaiveDate,
    /// Month label derived from `snapshot_date`, e.g. `"Jan-2024"`.
    pub month: String,
    /// Upstream system that produced the submission.
    pub fo_system: String,
    pub asset_class: String,
    pub product_type: String,
}

/// Formats a date as the canonical `"Mon-YYYY"` month label.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b-%Y").to_string()
}

/// Parses a `"Mon-YYYY"` label back to the first day of its month.
///
/// Month counters are keyed by label, so chronological ordering requires
/// parsing the label back instead of sorting the strings.
pub fn parse_month_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01-{label}"), "%d-%b-%Y").ok()
}
