//! Error handling for nackscan.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod load_error;
pub mod parse_error;
pub mod pipeline_error;
pub mod report_error;
pub mod schema_error;

pub use config_error::ConfigError;
pub use error_code::NackscanErrorCode;
pub use load_error::LoadError;
pub use parse_error::ParseError;
pub use pipeline_error::PipelineError;
pub use report_error::ReportError;
pub use schema_error::SchemaError;
