//! # Folio
//!
//! Portfolio valuation and risk aggregation.
//!
//! This crate re-exports the public API of the Folio library crates:
//!
//! - [`folio_core`] - dates, symbols and core errors
//! - [`folio_market`] - reference universe, quotes, screener
//! - [`folio_portfolio`] - holding ledger and valuation engine
//!
//! ## Example
//!
//! ```rust
//! use folio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let as_of = Date::from_ymd(2025, 10, 18).unwrap();
//! let mut ledger = Ledger::with_reference_universe();
//! ledger.add_lot_as_of(NewLot::new("AAPL", 10, dec!(200), "2024-09-13"), as_of).unwrap();
//!
//! let mut quotes = QuoteBook::from_universe(&StockUniverse::reference()).unwrap();
//! quotes.reprice("AAPL", dec!(250)).unwrap();
//!
//! let snapshot = value_portfolio(ledger.lots(), &quotes, as_of, &ValuationConfig::default()).unwrap();
//! assert_eq!(snapshot.totals.total_value, dec!(2500));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use folio_core;
pub use folio_market;
pub use folio_portfolio;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use folio_core::prelude::*;
    pub use folio_market::prelude::*;
    pub use folio_portfolio::prelude::*;
}
