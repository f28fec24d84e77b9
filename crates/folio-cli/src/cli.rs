//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, ExportArgs, ScreenArgs, SearchArgs, SessionArgs, UniverseArgs, ValueArgs,
};

/// Folio - Portfolio valuation and risk aggregation CLI
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the saved preference, then table)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the preferences file
    #[arg(long, env = "FOLIO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the reference stock universe
    Universe(UniverseArgs),

    /// Search the universe by symbol, company or sector
    Search(SearchArgs),

    /// Screen the universe by sector, market cap and risk
    Screen(ScreenArgs),

    /// Value a lot file and print the snapshot
    Value(ValueArgs),

    /// Export a lot file's valuation as CSV
    Export(ExportArgs),

    /// Run an interactive in-memory ledger
    Session(SessionArgs),

    /// Manage preferences
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one value per line)
    Minimal,
}

impl OutputFormat {
    /// Parses a saved preference value.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}
