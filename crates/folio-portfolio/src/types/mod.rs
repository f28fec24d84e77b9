//! Core portfolio types.

mod config;
mod lot;

pub use config::ValuationConfig;
pub use lot::{Lot, LotId, NewLot};
