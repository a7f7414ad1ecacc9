//! Laptop EDA - Laptop Price Dataset Analysis
//!
//! Loads the laptop listings CSV, cleans the unit-suffixed columns, prints
//! descriptive statistics and renders five charts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any load, clean, statistics or rendering error

mod charts;
mod cli;
mod data;
mod report;
mod stats;

use anyhow::{Context, Result};
use charts::StaticChartRenderer;
use cli::Args;
use data::table::{INCHES, PRICE};
use data::DataLoader;
use report::AnalysisReport;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(&args);
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Analysis failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout only
/// carries the statistics report.
fn init_logging(args: &Args) {
    let level = args.log_level().to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load, clean, report, render.
fn run(args: &Args) -> Result<()> {
    info!("Laptop EDA v{}", env!("CARGO_PKG_VERSION"));

    let raw = DataLoader::load_csv(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    debug!("Raw columns: {:?}", raw.column_names());
    let table = raw.clean().context("Failed to clean dataset")?;
    debug!("Cleaned columns: {:?}", table.column_names());

    let report = AnalysisReport::from_table(&table).context("Failed to compute statistics")?;
    println!("{}", report);
    if let Some(r) = report.correlation.get(PRICE, INCHES) {
        info!("Price vs screen size correlation: {:.3}", r);
    }

    if let Some(path) = &args.json {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote JSON report to {}", path.display());
    }

    if args.no_charts {
        return Ok(());
    }

    let charts = StaticChartRenderer::render_all(&table, &args.output_dir)
        .context("Failed to render charts")?;
    info!(
        "Rendered {} charts into {}",
        charts.len(),
        args.output_dir.display()
    );

    if args.open {
        for chart in &charts {
            open::that(chart).with_context(|| format!("Failed to open {}", chart.display()))?;
        }
    }

    Ok(())
}
