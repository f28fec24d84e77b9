//! CSV export of valued lots.
//!
//! One header row, then one row per lot in ledger order:
//!
//! ```text
//! Symbol,Company,Shares,PurchasePrice,PurchaseDate,CurrentPrice,MarketValue,GainLoss,GainLossPercent,HoldingPeriod
//! AAPL,Apple Inc.,10,200.00,2024-09-13,245.50,2455.00,455.00,22.75,1.1 years
//! ```
//!
//! Money and percent columns carry two decimals. A field is quoted only
//! when it contains a delimiter, quote or newline.

use std::io;

use folio_core::Date;
use folio_market::{QuoteBook, SecurityDirectory};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Lot;
use crate::valuation::value_lot;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 10] = [
    "Symbol",
    "Company",
    "Shares",
    "PurchasePrice",
    "PurchaseDate",
    "CurrentPrice",
    "MarketValue",
    "GainLoss",
    "GainLossPercent",
    "HoldingPeriod",
];

/// Writes the CSV export to any writer.
///
/// Company names come from `directory`; unknown symbols get an empty
/// company field.
///
/// # Errors
///
/// - `MissingQuote` if any lot's symbol has no quote (nothing is written)
/// - `Export` if the writer fails
pub fn write_csv<W, D>(
    writer: W,
    lots: &[Lot],
    quotes: &QuoteBook,
    directory: &D,
    as_of: Date,
) -> PortfolioResult<()>
where
    W: io::Write,
    D: SecurityDirectory + ?Sized,
{
    let valuations = lots
        .iter()
        .map(|lot| value_lot(lot, quotes, as_of))
        .collect::<PortfolioResult<Vec<_>>>()?;

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for v in &valuations {
        let company = directory.company_name(v.symbol.as_str()).unwrap_or("");
        let record = [
            v.symbol.to_string(),
            company.to_string(),
            v.shares.to_string(),
            fmt2(v.purchase_price),
            v.purchase_date.to_string(),
            fmt2(v.current_price),
            fmt2(v.market_value),
            fmt2(v.gain_loss),
            fmt2(v.gain_loss_pct),
            v.holding_period.label.clone(),
        ];
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|e| PortfolioError::Export {
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Renders the CSV export as a string.
///
/// # Errors
///
/// Returns `MissingQuote` if any lot's symbol has no quote.
pub fn export_csv<D>(
    lots: &[Lot],
    quotes: &QuoteBook,
    directory: &D,
    as_of: Date,
) -> PortfolioResult<String>
where
    D: SecurityDirectory + ?Sized,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, lots, quotes, directory, as_of)?;
    String::from_utf8(buffer).map_err(|e| PortfolioError::Export {
        reason: e.to_string(),
    })
}

/// Default file name for an export made on `as_of`.
#[must_use]
pub fn export_filename(as_of: Date) -> String {
    format!("portfolio_{as_of}.csv")
}

fn fmt2(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
