//! # Folio Market
//!
//! Reference market data consumed by the Folio valuation engine.
//!
//! - **Universe**: [`StockUniverse`] of tradeable [`StockProfile`]s, behind
//!   the [`SecurityDirectory`] lookup trait
//! - **Quotes**: [`PriceQuote`] and the [`QuoteBook`] supplied to each
//!   valuation, with [`QuoteBook::reprice`] for price ticks
//! - **Classification**: [`Sector`], [`RiskBucket`], [`MarketCap`]
//! - **Screening**: [`screen`] with a composable [`ScreenerFilter`]
//!
//! ## Example
//!
//! ```rust
//! use folio_market::prelude::*;
//!
//! let universe = StockUniverse::reference();
//! let quotes = QuoteBook::from_universe(&universe).unwrap();
//!
//! let filter = ScreenerFilter::new()
//!     .with_sector(Sector::Financial)
//!     .with_risk(RiskBucket::Low);
//! let hits = screen(&universe, &quotes, &filter);
//! assert_eq!(hits.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod market_cap;
pub mod quote;
pub mod risk;
pub mod screener;
pub mod sector;
pub mod universe;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MarketError, MarketResult};
    pub use crate::market_cap::{MarketCap, MarketCapClass};
    pub use crate::quote::{PriceMove, PriceQuote, QuoteBook};
    pub use crate::risk::{RiskBucket, RiskThresholds};
    pub use crate::screener::{screen, ScreenerFilter};
    pub use crate::sector::Sector;
    pub use crate::universe::{SecurityDirectory, StockProfile, StockUniverse};
}

pub use error::{MarketError, MarketResult};
pub use market_cap::{MarketCap, MarketCapClass};
pub use quote::{PriceMove, PriceQuote, QuoteBook};
pub use risk::{RiskBucket, RiskThresholds};
pub use screener::{screen, ScreenerFilter};
pub use sector::Sector;
pub use universe::{SecurityDirectory, StockProfile, StockUniverse};
