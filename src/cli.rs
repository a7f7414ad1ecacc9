//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Laptop EDA - clean a laptop price dataset, print statistics and render charts
///
/// Examples:
///   laptop_eda Laptop-Price.csv
///   laptop_eda data/laptops.csv --output-dir out --json out/report.json
///   laptop_eda Laptop-Price.csv --no-charts -q
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the laptop listings CSV file
    #[arg(value_name = "FILE", default_value = "Laptop-Price.csv")]
    pub input: PathBuf,

    /// Directory the chart images are written to
    #[arg(
        short,
        long,
        default_value = "charts",
        value_name = "DIR",
        env = "LAPTOP_EDA_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Also write the statistics report as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Open each chart with the system image viewer after rendering
    #[arg(long)]
    pub open: bool,

    /// Print statistics only, skip chart rendering
    #[arg(long, conflicts_with = "open")]
    pub no_charts: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(format!("Invalid log level: {}", self.log_level));
        }

        Ok(())
    }

    /// Effective log level after --verbose / --quiet.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::WARN
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            self.log_level.parse().unwrap_or(tracing::Level::INFO)
        }
    }
}
