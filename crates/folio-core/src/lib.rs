//! # Folio Core
//!
//! Foundation types shared by every Folio crate.
//!
//! - **Types**: [`Date`] for purchase and valuation dates, [`Symbol`] for tickers
//! - **Errors**: [`CoreError`] for malformed dates and symbols
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//!
//! let symbol = Symbol::new(" aapl ").unwrap();
//! assert_eq!(symbol.as_str(), "AAPL");
//!
//! let bought = Date::parse("2024-09-13").unwrap();
//! let today = Date::from_ymd(2025, 10, 18).unwrap();
//! assert_eq!(bought.days_between(&today), 400);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Symbol};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Symbol};
