//! # Folio Portfolio
//!
//! Holding ledger and valuation engine.
//!
//! ## Design Philosophy
//!
//! - **Explicit ownership**: the caller owns a [`Ledger`] and hands its lots
//!   to the engine; the engine never mutates the ledger
//! - **Pure functions**: valuation is deterministic given
//!   `(lots, quotes, as_of, config)`, with no caching
//! - **Exact arithmetic**: all money and ratios are `Decimal`, so no `NaN`
//!   can reach a total
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_core::Date;
//! use folio_market::{QuoteBook, StockUniverse};
//! use folio_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let as_of = Date::from_ymd(2025, 10, 18).unwrap();
//! let mut ledger = Ledger::with_reference_universe();
//! ledger.add_lot_as_of(NewLot::new("AAPL", 10, dec!(200), "2024-09-13"), as_of).unwrap();
//! ledger.add_lot_as_of(NewLot::new("JPM", 5, dec!(250), "2025-03-01"), as_of).unwrap();
//!
//! let quotes = QuoteBook::from_universe(&StockUniverse::reference()).unwrap();
//! let snapshot = value_portfolio(ledger.lots(), &quotes, as_of, &ValuationConfig::default()).unwrap();
//!
//! assert_eq!(snapshot.totals.lot_count, 2);
//! assert!(snapshot.risk.value_at_risk_95 < dec!(0));
//! ```
//!
//! ## Module Overview
//!
//! - [`ledger`] - Append/remove-only lot ledger
//! - [`valuation`] - Holding periods, lot and portfolio valuation
//! - [`analytics`] - Weighted beta/volatility and risk approximations
//! - [`bucketing`] - Sector and risk-bucket allocation
//! - [`export`] - CSV export
//! - [`types`] - Lots and configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod error;
pub mod export;
pub mod ledger;
pub mod types;
pub mod valuation;

pub use error::{ErrorKind, PortfolioError, PortfolioResult};

pub use types::{Lot, LotId, NewLot, ValuationConfig};

pub use ledger::Ledger;

pub use valuation::{
    holding_period, total_market_value, value_lot, value_portfolio, BestPerformer, HoldingPeriod,
    LotValuation, PortfolioTotals, ValuationSnapshot,
};

pub use analytics::{calculate_risk_metrics, weighted_beta, weighted_volatility, RiskMetrics};

pub use bucketing::{
    allocate_by_risk, allocate_by_sector, AllocationBucket, RiskAllocation, SectorAllocation,
};

pub use export::{export_csv, export_filename, write_csv, CSV_HEADERS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorKind, PortfolioError, PortfolioResult};
    pub use crate::export::{export_csv, write_csv};
    pub use crate::ledger::Ledger;
    pub use crate::types::{Lot, LotId, NewLot, ValuationConfig};
    pub use crate::valuation::{
        holding_period, value_lot, value_portfolio, LotValuation, ValuationSnapshot,
    };
}
