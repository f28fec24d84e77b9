//! Export command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use folio_portfolio::{export_filename, write_csv};
use tracing::info;

use super::config::Preferences;
use super::{build_ledger, load_lots, load_quotes, parse_as_of};
use crate::output::print_success;

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Lot file (JSON/YAML list of symbol, shares, purchase_price, purchase_date)
    #[arg(short, long)]
    pub lots: PathBuf,

    /// Quote file (JSON/YAML); defaults to reference quotes
    #[arg(long)]
    pub quotes: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Output file; a directory gets portfolio_<as-of>.csv. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the export command.
///
/// CSV is always the output, so the global `--format` does not apply.
pub fn execute(args: ExportArgs, prefs: &Preferences) -> Result<()> {
    let as_of = parse_as_of(args.as_of.as_deref())?;
    let ledger = build_ledger(load_lots(&args.lots)?, as_of)?;
    let quotes = load_quotes(args.quotes.as_deref(), prefs)?;

    match args.output {
        Some(mut path) => {
            if path.is_dir() {
                path.push(export_filename(as_of));
            }
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_csv(&mut writer, ledger.lots(), &quotes, ledger.directory(), as_of)?;
            writer.flush()?;

            info!(lots = ledger.len(), path = %path.display(), "exported portfolio");
            print_success(&format!("Exported {} lots to {}", ledger.len(), path.display()));
        }
        None => {
            let stdout = io::stdout();
            write_csv(stdout.lock(), ledger.lots(), &quotes, ledger.directory(), as_of)?;
        }
    }

    Ok(())
}
