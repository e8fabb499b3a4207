//! `quarterly` is a small desktop dashboard for eyeballing quarterly performance numbers.
//!
//! Paste comma separated text (or load the built-in sample), press "Visualize Data", and the
//! tracked series (`BAS`, `ATS`, `RAS`, `CNS`) are drawn as a line or bar chart together with a
//! summary card per series showing the latest value and its change from the previous record.
//!
//! # Example usage:
//! ```sh
//! # Start with an empty paste area
//! quarterly
//! # Start with the sample data already visualized, as a bar chart
//! quarterly --sample --visualize --chart bar
//! # Pre-fill the paste area from a file, or from stdin with `-`
//! quarterly --input results.csv
//! cat results.csv | quarterly --input - --visualize
//! ```
//!
//! # Input format
//! The first line is the header. Every later non-blank line is a record. Cells are split on `,`
//! with no quoting, and each cell is typed once: finite numbers become numbers, empty cells carry
//! no value, everything else stays text. The first column labels the category axis.
//!
//! # Logging
//! Uses `env_logger`, so `RUST_LOG=debug quarterly` shows parse outcomes and UI events.

use anyhow::Result;
use chart::ChartMode;
use clap::{Parser, ValueEnum};
use runner::run_dashboard;

mod chart;
mod dashboard;
mod dataset;
mod palette;
mod parsers;
mod runner;
mod summary;

/// Chart shown at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartArg {
    Line,
    Bar,
}

impl From<ChartArg> for ChartMode {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Line => ChartMode::Line,
            ChartArg::Bar => ChartMode::Bar,
        }
    }
}

/// `quarterly` visualizes pasted CSV data as a line or bar chart with summary statistics
#[derive(Debug, Parser)]
struct Args {
    /// Pre-fill the paste area with the contents of this file. Use `-` to read stdin.
    #[arg(short, long, conflicts_with = "sample")]
    input: Option<String>,
    /// Pre-fill the paste area with the built-in sample data
    #[arg(short, long)]
    sample: bool,
    /// Chart shown at start-up
    #[arg(short, long, value_enum, default_value_t = ChartArg::Line)]
    chart: ChartArg,
    /// Parse the pre-filled text immediately instead of waiting for "Visualize Data"
    #[arg(short, long)]
    visualize: bool,
}

/// Primary entrypoint for `quarterly`
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run_dashboard(args)
}
