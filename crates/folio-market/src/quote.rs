//! Price quotes and the quote book handed to the valuation engine.

use std::collections::HashMap;

use folio_core::Symbol;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MarketError, MarketResult};
use crate::risk::{RiskBucket, RiskThresholds};
use crate::sector::Sector;
use crate::universe::StockUniverse;

/// Current market data for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuoteRecord")]
pub struct PriceQuote {
    /// Last traded price.
    pub current_price: Decimal,

    /// Beta against the broad market.
    pub beta: Decimal,

    /// Annualized volatility, in percent.
    pub volatility: Decimal,

    /// Sector classification.
    pub sector: Sector,
}

/// Unvalidated wire shape of a quote.
#[derive(Deserialize)]
struct QuoteRecord {
    current_price: Decimal,
    beta: Decimal,
    volatility: Decimal,
    sector: Sector,
}

impl TryFrom<QuoteRecord> for PriceQuote {
    type Error = MarketError;

    fn try_from(r: QuoteRecord) -> Result<Self, Self::Error> {
        Self::new(r.current_price, r.beta, r.volatility, r.sector)
    }
}

impl PriceQuote {
    /// Creates a validated quote.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidQuote` if the price is not positive or
    /// the volatility is negative.
    pub fn new(
        current_price: Decimal,
        beta: Decimal,
        volatility: Decimal,
        sector: Sector,
    ) -> MarketResult<Self> {
        if current_price <= Decimal::ZERO {
            return Err(MarketError::invalid_quote(format!(
                "current price must be positive, got {current_price}"
            )));
        }
        if volatility.is_sign_negative() && !volatility.is_zero() {
            return Err(MarketError::invalid_quote(format!(
                "volatility cannot be negative, got {volatility}"
            )));
        }
        Ok(Self {
            current_price,
            beta,
            volatility,
            sector,
        })
    }

    /// Classifies this quote's volatility.
    #[must_use]
    pub fn risk_bucket(&self, thresholds: &RiskThresholds) -> RiskBucket {
        RiskBucket::classify(self.volatility, thresholds)
    }
}

/// Outcome of applying a price tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMove {
    /// Price before the tick.
    pub previous_price: Decimal,

    /// Price after the tick.
    pub current_price: Decimal,

    /// Absolute change.
    pub change: Decimal,

    /// Change relative to the previous price, in percent.
    pub change_pct: Decimal,
}

/// Symbol to quote mapping supplied to each valuation call.
///
/// Deserializes from a plain map such as
/// `{"AAPL": {"current_price": "245.50", "beta": "1.2", "volatility": "25", "sector": "Technology"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteBook {
    quotes: HashMap<Symbol, PriceQuote>,
}

impl QuoteBook {
    /// Creates an empty quote book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from the reference figures of every profile.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidQuote` if any profile's reference
    /// figures do not form a valid quote.
    pub fn from_universe(universe: &StockUniverse) -> MarketResult<Self> {
        let mut book = Self::new();
        for profile in universe {
            book.insert(profile.symbol.clone(), profile.reference_quote()?);
        }
        Ok(book)
    }

    /// Inserts or replaces a quote, returning the previous one.
    pub fn insert(&mut self, symbol: Symbol, quote: PriceQuote) -> Option<PriceQuote> {
        self.quotes.insert(symbol, quote)
    }

    /// Looks up a quote by symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&PriceQuote> {
        self.quotes
            .get(symbol)
            .or_else(|| self.quotes.get(symbol.trim().to_ascii_uppercase().as_str()))
    }

    /// Returns true if a quote exists for the symbol.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Returns the number of quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the book holds no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterates over quotes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &PriceQuote)> {
        self.quotes.iter()
    }

    /// Moves a symbol's price, reporting the change against the prior price.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::UnknownSymbol` if the book has no quote for the
    /// symbol, or `MarketError::InvalidPrice` if `new_price` is not positive
    /// or its percentage move cannot be represented. The book is unchanged
    /// on error.
    pub fn reprice(&mut self, symbol: &str, new_price: Decimal) -> MarketResult<PriceMove> {
        if new_price <= Decimal::ZERO {
            return Err(MarketError::invalid_price(symbol, new_price));
        }

        let key = Symbol::new(symbol)?;
        let quote = self
            .quotes
            .get_mut(&key)
            .ok_or_else(|| MarketError::unknown_symbol(key.as_str()))?;

        let previous_price = quote.current_price;
        let change = new_price - previous_price;
        let change_pct = change
            .checked_div(previous_price)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| MarketError::invalid_price(key.as_str(), new_price))?;
        quote.current_price = new_price;

        debug!(symbol = %key, %previous_price, %new_price, %change_pct, "repriced quote");

        Ok(PriceMove {
            previous_price,
            current_price: new_price,
            change,
            change_pct,
        })
    }
}

impl FromIterator<(Symbol, PriceQuote)> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = (Symbol, PriceQuote)>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}
