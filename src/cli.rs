//! Command-line interface definitions for Crime Trends.
//!
//! This module defines the CLI arguments using the `clap` crate. The scrape
//! and analysis parameters themselves (categories, page bound, timeout,
//! keyword list) are fixed in [`crate::config::PipelineConfig`]; the CLI only
//! controls where output files land and whether to reuse an existing CSV.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Crime Trends pipeline.
///
/// # Examples
///
/// ```sh
/// # Scrape and analyze, writing CSV and PNG to the current directory
/// crime_trends
///
/// # Write outputs elsewhere
/// crime_trends -o ./out
///
/// # Analyze a previously collected CSV without scraping
/// crime_trends --analyze ./out/news_title_20250825_090000.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory where the CSV and chart image are written
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Analyze an existing collector CSV instead of scraping
    #[arg(long, value_name = "FILE")]
    pub analyze: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["crime_trends"]);

        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.analyze.is_none());
    }

    #[test]
    fn test_cli_output_dir() {
        let cli = Cli::parse_from(&["crime_trends", "--output-dir", "/tmp/out"]);

        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["crime_trends", "-o", "./out"]);

        assert_eq!(cli.output_dir, PathBuf::from("./out"));
    }

    #[test]
    fn test_cli_analyze_existing_csv() {
        let cli = Cli::parse_from(&[
            "crime_trends",
            "--analyze",
            "./news_title_20250825_090000.csv",
        ]);

        assert_eq!(
            cli.analyze,
            Some(PathBuf::from("./news_title_20250825_090000.csv"))
        );
    }
}
