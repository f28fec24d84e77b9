//! Valuation engine.
//!
//! Pure and deterministic given `(lots, quotes, as_of, config)`: no hidden
//! state, no randomness, no side effects. A fresh [`ValuationSnapshot`] is
//! computed on every call.

mod holding_period;
mod lot;
mod snapshot;

pub use holding_period::*;
pub use lot::*;
pub use snapshot::*;
