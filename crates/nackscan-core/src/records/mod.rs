//! Rejection records: input row types, date coercion and month labels.

pub mod normalizer;
pub mod types;

pub use normalizer::{RecordNormalizer, DATE_FORMATS};
pub use types::{month_label, parse_month_label, RawRecord, RejectionRecord, UNKNOWN};
