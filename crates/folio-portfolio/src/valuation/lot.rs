//! Single-lot valuation.

use folio_core::{Date, Symbol};
use folio_market::{QuoteBook, Sector};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holding_period::{holding_period, HoldingPeriod};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{Lot, LotId};

/// Valuation of one lot against its current quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotValuation {
    /// Lot id.
    pub lot_id: LotId,

    /// Ticker symbol.
    pub symbol: Symbol,

    /// Shares held.
    pub shares: u64,

    /// Price paid per share.
    pub purchase_price: Decimal,

    /// Purchase date.
    pub purchase_date: Date,

    /// Current quoted price.
    pub current_price: Decimal,

    /// `shares * current_price`.
    pub market_value: Decimal,

    /// `shares * purchase_price`.
    pub total_cost: Decimal,

    /// `market_value - total_cost`.
    pub gain_loss: Decimal,

    /// `gain_loss / total_cost * 100`.
    pub gain_loss_pct: Decimal,

    /// Time held as of the valuation date.
    pub holding_period: HoldingPeriod,

    /// Quoted beta.
    pub beta: Decimal,

    /// Quoted volatility, in percent.
    pub volatility: Decimal,

    /// Quoted sector.
    pub sector: Sector,
}

/// Values one lot.
///
/// # Errors
///
/// - `MissingQuote` if the book has no quote for the lot's symbol. No
///   default price is ever substituted.
/// - `Overflow` if market value or gain/loss percent leaves the `Decimal`
///   range, e.g. a near-zero cost basis against a normal quote.
pub fn value_lot(lot: &Lot, quotes: &QuoteBook, as_of: Date) -> PortfolioResult<LotValuation> {
    let quote = quotes
        .get(lot.symbol().as_str())
        .ok_or_else(|| PortfolioError::missing_quote(lot.symbol().as_str()))?;

    let market_value = Decimal::from(lot.shares())
        .checked_mul(quote.current_price)
        .ok_or_else(|| PortfolioError::overflow(format!("market value of {}", lot.symbol())))?;
    let total_cost = lot.total_cost();
    let gain_loss = market_value
        .checked_sub(total_cost)
        .ok_or_else(|| PortfolioError::overflow(format!("gain/loss of {}", lot.symbol())))?;
    // total_cost > 0 by Lot invariant
    let gain_loss_pct = gain_loss
        .checked_div(total_cost)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| PortfolioError::overflow(format!("gain/loss percent of {}", lot.symbol())))?;

    Ok(LotValuation {
        lot_id: lot.id(),
        symbol: lot.symbol().clone(),
        shares: lot.shares(),
        purchase_price: lot.purchase_price(),
        purchase_date: lot.purchase_date(),
        current_price: quote.current_price,
        market_value,
        total_cost,
        gain_loss,
        gain_loss_pct,
        holding_period: holding_period(lot.purchase_date(), as_of),
        beta: quote.beta,
        volatility: quote.volatility,
        sector: quote.sector,
    })
}

/// Sums market values across valued lots.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` if the sum leaves the `Decimal` range.
pub fn total_market_value(valuations: &[LotValuation]) -> PortfolioResult<Decimal> {
    valuations
        .iter()
        .try_fold(Decimal::ZERO, |total, v| total.checked_add(v.market_value))
        .ok_or_else(|| PortfolioError::overflow("total market value"))
}
