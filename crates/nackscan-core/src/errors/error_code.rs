//! Stable error codes for machine-readable diagnostics.

/// Trait implemented by all subsystem errors to expose a stable code.
/// Codes are part of the external contract and never change meaning.
pub trait NackscanErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const PARSE_ERROR: &str = "NACKSCAN_PARSE";
pub const SCHEMA_ERROR: &str = "NACKSCAN_SCHEMA";
pub const LOAD_ERROR: &str = "NACKSCAN_LOAD";
pub const CONFIG_ERROR: &str = "NACKSCAN_CONFIG";
pub const REPORT_ERROR: &str = "NACKSCAN_REPORT";
