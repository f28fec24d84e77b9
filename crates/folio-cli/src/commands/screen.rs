//! Screen command implementation.
//!
//! Filters the reference universe by sector, market-cap class and risk
//! bucket. Risk uses quoted volatility where a quote exists.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use folio_market::{screen, MarketCapClass, RiskBucket, ScreenerFilter, Sector, StockUniverse};
use tracing::debug;

use super::config::Preferences;
use super::load_quotes;
use super::universe::{print_stocks, StockRow};
use crate::cli::OutputFormat;
use crate::output::print_header;

/// Arguments for the screen command.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Sector to keep
    #[arg(short, long)]
    pub sector: Option<Sector>,

    /// Market-cap class to keep (mega, large, mid, small)
    #[arg(short, long)]
    pub market_cap: Option<MarketCapClass>,

    /// Risk bucket to keep (low, medium, high)
    #[arg(short, long)]
    pub risk: Option<RiskBucket>,

    /// Quote file (JSON/YAML); defaults to reference quotes
    #[arg(long)]
    pub quotes: Option<PathBuf>,
}

impl ScreenArgs {
    fn filter(&self) -> ScreenerFilter {
        let mut filter = ScreenerFilter::new();
        if let Some(sector) = self.sector {
            filter = filter.with_sector(sector);
        }
        if let Some(class) = self.market_cap {
            filter = filter.with_market_cap(class);
        }
        if let Some(bucket) = self.risk {
            filter = filter.with_risk(bucket);
        }
        filter
    }
}

/// Execute the screen command.
pub fn execute(args: ScreenArgs, format: OutputFormat, prefs: &Preferences) -> Result<()> {
    let universe = StockUniverse::reference();
    let quotes = load_quotes(args.quotes.as_deref(), prefs)?;
    let filter = args.filter();

    let hits = screen(&universe, &quotes, &filter);
    debug!(hits = hits.len(), ?filter, "screened universe");

    let rows: Vec<StockRow> = hits
        .into_iter()
        .map(|p| StockRow::new(p, quotes.get(p.symbol.as_str())))
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Screener: {} matches", rows.len()));
    }
    print_stocks(&rows, format)
}
