use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trade_report::scope::ScopeKind;

/// Trade, investment and tourism profile reports from a CSV warehouse.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the report for one grouping and unit and write it to disk.
    Generate(GenerateArgs),
    /// List the selectable units of a grouping.
    Options(OptionsArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory holding the warehouse, parameter and reference CSV files.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Grouping the unit belongs to.
    #[arg(long, value_enum)]
    pub grouping: ScopeKind,

    /// Unit to report on (e.g. "Chile"); not needed for `national`.
    #[arg(long)]
    pub unit: Option<String>,

    /// Minimum export value (USD) for a company to be counted.
    #[arg(long, default_value_t = 10_000.0)]
    pub threshold: f64,

    /// Where the CSV and JSON outputs are written.
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Rows shown in each console preview.
    #[arg(long, default_value_t = 8)]
    pub preview_rows: usize,
}

#[derive(Parser)]
pub struct OptionsArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, value_enum)]
    pub grouping: ScopeKind,
}
