//! # Crime Trends
//!
//! A news scraping and analysis pipeline that collects article listings from
//! a paginated news site across several topic categories, persists them to a
//! timestamped CSV file, and charts how often crime-related keywords appear
//! in article titles.
//!
//! ## Usage
//!
//! ```sh
//! # Scrape, then analyze the fresh CSV
//! crime_trends -o ./out
//!
//! # Re-analyze a previously collected CSV
//! crime_trends -o ./out --analyze ./out/news_title_20250825_090000.csv
//! ```
//!
//! ## Architecture
//!
//! The application is a two-stage pipeline:
//! 1. **Collection**: Walk each category's listing pages sequentially,
//!    extract title/link/date per article, and write everything to one CSV
//! 2. **Analysis**: Count crime keywords in the collected titles, print the
//!    tally, and render an annotated bar chart PNG
//!
//! Collection failures are contained per page and per candidate element, so
//! a run always produces an output file. A missing or malformed CSV handed
//! to the analyzer is the one fatal condition.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analyzer;
mod cli;
mod collector;
mod config;
mod models;
mod utils;

use cli::Cli;
use config::PipelineConfig;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("crime_trends starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.analyze, "Parsed CLI arguments");

    let config = PipelineConfig::default();

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Collect (unless re-analyzing an existing CSV) ----
    let csv_path = match args.analyze {
        Some(path) => {
            info!(path = %path.display(), "Skipping collection; analyzing existing CSV");
            path
        }
        None => collector::collect_news(&config, &args.output_dir).await?,
    };

    // ---- Analyze ----
    let chart_path = analyzer::analyze_news(&config, &csv_path, &args.output_dir)?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        csv = %csv_path.display(),
        chart = %chart_path.display(),
        "Execution complete"
    );

    Ok(())
}
