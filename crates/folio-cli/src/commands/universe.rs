//! Universe command implementation.
//!
//! Lists the reference stock universe.

use anyhow::Result;
use clap::Args;
use folio_market::{PriceQuote, RiskBucket, RiskThresholds, Sector, StockProfile, StockUniverse};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::output::{format_decimal, print_header, print_output};

/// Arguments for the universe command.
#[derive(Args, Debug)]
pub struct UniverseArgs {
    /// Only list stocks in this sector (e.g. technology, "consumer staples")
    #[arg(short, long)]
    pub sector: Option<Sector>,
}

/// One stock, as shown by universe, search and screen.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StockRow {
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Company")]
    pub company: String,
    #[tabled(rename = "Sector")]
    pub sector: String,
    #[tabled(rename = "Market Cap")]
    pub market_cap: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Beta")]
    pub beta: String,
    #[tabled(rename = "Vol %")]
    pub volatility: String,
    #[tabled(rename = "Risk")]
    pub risk: String,
}

impl StockRow {
    /// Builds a row, preferring live quote figures over reference ones.
    pub fn new(profile: &StockProfile, quote: Option<&PriceQuote>) -> Self {
        let (price, beta, volatility) = quote.map_or(
            (profile.reference_price, profile.beta, profile.volatility),
            |q| (q.current_price, q.beta, q.volatility),
        );
        let risk = RiskBucket::classify_inclusive(volatility, &RiskThresholds::default());

        Self {
            symbol: profile.symbol.to_string(),
            company: profile.name.clone(),
            sector: profile.sector.to_string(),
            market_cap: profile.market_cap.to_string(),
            price: format_decimal(price, 2),
            beta: format_decimal(beta, 2),
            volatility: format_decimal(volatility, 1),
            risk: risk.to_string(),
        }
    }
}

/// Prints stock rows; minimal output is one symbol per line.
pub fn print_stocks(rows: &[StockRow], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Minimal {
        for row in rows {
            println!("{}", row.symbol);
        }
        return Ok(());
    }
    print_output(rows, format)
}

/// Execute the universe command.
pub fn execute(args: UniverseArgs, format: OutputFormat) -> Result<()> {
    let universe = StockUniverse::reference();

    let profiles: Vec<&StockProfile> = match args.sector {
        Some(sector) => universe.in_sector(sector),
        None => universe.iter().collect(),
    };
    let rows: Vec<StockRow> = profiles.iter().map(|p| StockRow::new(p, None)).collect();

    if format == OutputFormat::Table {
        let title = match args.sector {
            Some(sector) => format!("Reference Universe: {sector}"),
            None => "Reference Universe".to_string(),
        };
        print_header(&title);
    }
    print_stocks(&rows, format)
}
