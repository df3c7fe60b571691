//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trendscope: trend analysis and business-health scoring for tabular data
#[derive(Parser)]
#[command(name = "trendscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file and report trends, health and recommendations
    Analyze {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the full JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with analysis thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the JSON report to stdout instead of a summary
        #[arg(long)]
        json: bool,

        /// File name to use for domain detection (default: the input's name)
        #[arg(long)]
        file_name: Option<String>,
    },

    /// Show the trend of a single column
    Trend {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to analyze
        #[arg(short = 'c', long)]
        column: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect the business domain of a data file
    Domain {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show the keyword score of every domain
        #[arg(long)]
        scores: bool,
    },
}
