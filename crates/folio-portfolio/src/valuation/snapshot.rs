//! Whole-portfolio valuation.

use folio_core::{Date, Symbol};
use folio_market::QuoteBook;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lot::{total_market_value, value_lot, LotValuation};
use crate::analytics::{calculate_risk_metrics, RiskMetrics};
use crate::bucketing::{allocate_by_risk, allocate_by_sector, RiskAllocation, SectorAllocation};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{Lot, LotId, ValuationConfig};

/// Portfolio totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Number of lots valued.
    pub lot_count: usize,

    /// Sum of market values.
    pub total_value: Decimal,

    /// Sum of cost bases.
    pub total_cost: Decimal,

    /// `total_value - total_cost`.
    pub total_gain_loss: Decimal,

    /// `total_gain_loss / total_cost * 100`, zero when cost is zero.
    pub total_gain_loss_pct: Decimal,
}

/// Lot with the highest percentage gain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPerformer {
    /// Lot id.
    pub lot_id: LotId,

    /// Ticker symbol.
    pub symbol: Symbol,

    /// Percentage gain of the lot.
    pub gain_loss_pct: Decimal,
}

/// Immutable result of one valuation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    /// Valuation date.
    pub as_of: Date,

    /// Per-lot valuations in ledger order.
    pub lots: Vec<LotValuation>,

    /// Portfolio totals.
    pub totals: PortfolioTotals,

    /// Best lot by percentage gain; `None` for an empty ledger.
    pub best_performer: Option<BestPerformer>,

    /// Risk approximations.
    pub risk: RiskMetrics,

    /// Allocation by sector.
    pub sector_allocation: SectorAllocation,

    /// Allocation by risk bucket.
    pub risk_allocation: RiskAllocation,
}

impl ValuationSnapshot {
    /// Returns true if no lots were valued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Returns the valuation of a specific lot.
    #[must_use]
    pub fn lot(&self, id: LotId) -> Option<&LotValuation> {
        self.lots.iter().find(|v| v.lot_id == id)
    }
}

/// Values every lot and aggregates totals, risk and allocations.
///
/// The whole call fails if any lot lacks a quote; a snapshot always covers
/// the entire ledger.
///
/// # Errors
///
/// - `MissingQuote` if any lot's symbol has no quote
/// - `InvalidConfig` if `config` does not validate
/// - `Overflow` if a lot or aggregate leaves the `Decimal` range
///
/// # Example
///
/// ```rust
/// use folio_core::Date;
/// use folio_market::{QuoteBook, StockUniverse};
/// use folio_portfolio::{value_portfolio, Ledger, NewLot, ValuationConfig};
/// use rust_decimal_macros::dec;
///
/// let as_of = Date::from_ymd(2025, 10, 18).unwrap();
/// let mut ledger = Ledger::with_reference_universe();
/// ledger
///     .add_lot_as_of(NewLot::new("AAPL", 10, dec!(200), "2024-09-13"), as_of)
///     .unwrap();
///
/// let quotes = QuoteBook::from_universe(&StockUniverse::reference()).unwrap();
/// let snapshot = value_portfolio(ledger.lots(), &quotes, as_of, &ValuationConfig::default()).unwrap();
/// assert_eq!(snapshot.totals.total_value, dec!(2455.00));
/// ```
pub fn value_portfolio(
    lots: &[Lot],
    quotes: &QuoteBook,
    as_of: Date,
    config: &ValuationConfig,
) -> PortfolioResult<ValuationSnapshot> {
    config.validate()?;

    let valuations = lots
        .iter()
        .map(|lot| value_lot(lot, quotes, as_of))
        .collect::<PortfolioResult<Vec<_>>>()?;

    let totals = calculate_totals(&valuations)?;
    let best_performer = find_best_performer(&valuations);
    let risk = calculate_risk_metrics(&valuations, config)?;
    let sector_allocation = allocate_by_sector(&valuations)?;
    let risk_allocation = allocate_by_risk(&valuations, &config.risk_thresholds)?;

    debug!(
        lots = totals.lot_count,
        total_value = %totals.total_value,
        weighted_volatility = %risk.weighted_volatility,
        "valued portfolio"
    );

    Ok(ValuationSnapshot {
        as_of,
        lots: valuations,
        totals,
        best_performer,
        risk,
        sector_allocation,
        risk_allocation,
    })
}

fn calculate_totals(valuations: &[LotValuation]) -> PortfolioResult<PortfolioTotals> {
    let total_value = total_market_value(valuations)?;
    let total_cost = valuations
        .iter()
        .try_fold(Decimal::ZERO, |sum, v| sum.checked_add(v.total_cost))
        .ok_or_else(|| PortfolioError::overflow("total cost"))?;
    let total_gain_loss = total_value
        .checked_sub(total_cost)
        .ok_or_else(|| PortfolioError::overflow("total gain/loss"))?;
    let total_gain_loss_pct = if total_cost > Decimal::ZERO {
        total_gain_loss
            .checked_div(total_cost)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| PortfolioError::overflow("total gain/loss percent"))?
    } else {
        Decimal::ZERO
    };

    Ok(PortfolioTotals {
        lot_count: valuations.len(),
        total_value,
        total_cost,
        total_gain_loss,
        total_gain_loss_pct,
    })
}

/// First lot with the strictly highest percentage gain.
fn find_best_performer(valuations: &[LotValuation]) -> Option<BestPerformer> {
    let mut best: Option<&LotValuation> = None;
    for v in valuations {
        if best.map_or(true, |b| v.gain_loss_pct > b.gain_loss_pct) {
            best = Some(v);
        }
    }
    best.map(|v| BestPerformer {
        lot_id: v.lot_id,
        symbol: v.symbol.clone(),
        gain_loss_pct: v.gain_loss_pct,
    })
}
