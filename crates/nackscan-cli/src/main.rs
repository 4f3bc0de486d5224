//! nackscan command-line driver.
//!
//! Loads a rejection CSV, runs the cluster analysis and writes the
//! configured reports. Console output goes to stdout; every other format
//! lands as a file in the output directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nackscan_core::config::{CliOverrides, NackscanConfig};
use nackscan_core::engine::AnalysisEngine;
use nackscan_core::errors::ReportError;
use nackscan_core::loader::CsvLoader;
use nackscan_core::report::create_reporter;

#[derive(Debug, Parser)]
#[command(name = "nackscan")]
#[command(version)]
#[command(about = "Cluster trade-repository NACK rejections into recurring error patterns")]
struct Args {
    /// Input CSV file with rejection rows
    input: PathBuf,

    /// Report formats to produce (console, markdown, csv, json); repeatable
    #[arg(short, long = "format")]
    formats: Vec<String>,

    /// Directory written reports land in
    #[arg(long)]
    out_dir: Option<String>,

    /// Signature ordering: ordered or unordered
    #[arg(long)]
    ordering: Option<String>,

    /// Append NACK types to the cluster key
    #[arg(long)]
    nack_types: bool,

    /// Split clusters by jurisdiction
    #[arg(long)]
    per_jurisdiction: bool,

    /// Drop clusters with fewer member bundles from the summary
    #[arg(long)]
    min_bundles: Option<usize>,

    /// Field delimiter for the input CSV, a single character
    #[arg(long)]
    delimiter: Option<String>,

    /// Limit rendered table rows; 0 keeps every row
    #[arg(long)]
    top: Option<usize>,

    /// Directory holding nackscan.toml (defaults to the working directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let overrides = cli_overrides(&args);
    let config_dir = args
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let config = NackscanConfig::load(&config_dir, Some(&overrides))
        .context("failed to resolve configuration")?;

    let loader = CsvLoader::with_delimiter(config.load.effective_delimiter()?);
    let engine = AnalysisEngine::from_config(&config)?;
    let report = engine
        .run_file(&args.input, &loader)
        .with_context(|| format!("failed to analyze {}", args.input.display()))?;

    let out_dir = PathBuf::from(config.report.effective_out_dir());
    let top = config.report.effective_top();
    for format in config.report.effective_formats() {
        // Validation already rejected unknown formats.
        let Some(reporter) = create_reporter(&format, top) else {
            return Err(ReportError::UnknownFormat(format).into());
        };
        let rendered = reporter.generate(&report)?;

        if format == "console" {
            println!("{rendered}");
            continue;
        }

        fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
        let path = out_dir.join(format!("clusters.{}", file_extension(&format)));
        fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), format = %format, "Report written");
    }

    Ok(())
}

fn cli_overrides(args: &Args) -> CliOverrides {
    CliOverrides {
        ordering: args.ordering.clone(),
        // Absent flags must not override lower layers.
        include_nack_types: args.nack_types.then_some(true),
        split_by_jurisdiction: args.per_jurisdiction.then_some(true),
        min_bundles: args.min_bundles,
        delimiter: args.delimiter.clone(),
        formats: args.formats.clone(),
        out_dir: args.out_dir.clone(),
        top: args.top,
    }
}

fn file_extension(format: &str) -> &'static str {
    match format {
        "markdown" => "md",
        "csv" => "csv",
        "json" => "json",
        _ => "txt",
    }
}
