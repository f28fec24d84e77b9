//! Portfolio allocation bucketing.
//!
//! - **Sector allocation**: Distribution by quoted sector
//! - **Risk allocation**: Distribution by volatility bucket
//!
//! All functions are pure - they take valued lots and return distributions
//! without modifying state.
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_portfolio::bucketing::*;
//!
//! let by_sector = allocate_by_sector(&snapshot.lots)?;
//! for (sector, bucket) in by_sector.sorted_by_weight() {
//!     println!("{}: {:.2}% weight", sector, bucket.weight_pct);
//! }
//! ```

mod risk;
mod sector;

pub use risk::*;
pub use sector::*;
