//! Purchase lots.

use folio_core::{Date, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PortfolioError, PortfolioResult};

/// Identifier of a lot, unique for the lifetime of its ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotId(u64);

impl LotId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LotId {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| PortfolioError::invalid_lot("id", format!("'{s}' is not a lot id")))
    }
}

/// One purchase of shares at a price and date.
///
/// Lots are immutable once created; correcting a lot means removing it
/// and adding a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lot {
    id: LotId,
    symbol: Symbol,
    shares: u64,
    purchase_price: Decimal,
    purchase_date: Date,
}

impl Lot {
    /// Creates a lot, checking the share count and price.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidLot` if `shares` is zero,
    /// `purchase_price` is not positive, or their product overflows.
    pub fn new(
        id: LotId,
        symbol: Symbol,
        shares: u64,
        purchase_price: Decimal,
        purchase_date: Date,
    ) -> PortfolioResult<Self> {
        if shares == 0 {
            return Err(PortfolioError::invalid_lot("shares", "must be positive"));
        }
        if purchase_price <= Decimal::ZERO {
            return Err(PortfolioError::invalid_lot(
                "purchase_price",
                format!("must be positive, got {purchase_price}"),
            ));
        }
        if Decimal::from(shares).checked_mul(purchase_price).is_none() {
            return Err(PortfolioError::invalid_lot(
                "shares",
                format!("{shares} x {purchase_price} exceeds the representable cost"),
            ));
        }
        Ok(Self {
            id,
            symbol,
            shares,
            purchase_price,
            purchase_date,
        })
    }

    /// Returns the lot id.
    #[must_use]
    pub fn id(&self) -> LotId {
        self.id
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the number of shares.
    #[must_use]
    pub fn shares(&self) -> u64 {
        self.shares
    }

    /// Returns the price paid per share.
    #[must_use]
    pub fn purchase_price(&self) -> Decimal {
        self.purchase_price
    }

    /// Returns the purchase date.
    #[must_use]
    pub fn purchase_date(&self) -> Date {
        self.purchase_date
    }

    /// Returns shares times purchase price.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        // Product fits: checked in Lot::new
        Decimal::from(self.shares) * self.purchase_price
    }
}

/// Unvalidated request to add a lot.
///
/// This is the shape of lot files read by the CLI:
/// `{"symbol": "AAPL", "shares": 10, "purchase_price": 200.0, "purchase_date": "2024-09-13"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLot {
    /// Ticker symbol, any case.
    pub symbol: String,

    /// Share count; must be positive.
    pub shares: i64,

    /// Price paid per share; must be positive.
    pub purchase_price: Decimal,

    /// Purchase date as `YYYY-MM-DD`.
    pub purchase_date: String,
}

impl NewLot {
    /// Creates a new lot request.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        shares: i64,
        purchase_price: Decimal,
        purchase_date: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            shares,
            purchase_price,
            purchase_date: purchase_date.into(),
        }
    }
}
