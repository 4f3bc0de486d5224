//! Configuration system for nackscan.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod load_config;
pub mod nackscan_config;
pub mod report_config;

pub use analysis_config::AnalysisConfig;
pub use load_config::LoadConfig;
pub use nackscan_config::{CliOverrides, NackscanConfig};
pub use report_config::ReportConfig;
