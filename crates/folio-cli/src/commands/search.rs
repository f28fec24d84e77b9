//! Search command implementation.

use anyhow::Result;
use clap::Args;
use folio_market::StockUniverse;

use super::universe::{print_stocks, StockRow};
use crate::cli::OutputFormat;
use crate::output::print_header;

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text matched against symbol, company name and sector
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Execute the search command.
pub fn execute(args: SearchArgs, format: OutputFormat) -> Result<()> {
    let universe = StockUniverse::reference();
    let rows: Vec<StockRow> = universe
        .search(&args.query)
        .into_iter()
        .take(args.limit)
        .map(|p| StockRow::new(p, None))
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Search: {}", args.query.trim()));
    }
    print_stocks(&rows, format)
}
