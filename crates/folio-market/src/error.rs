//! Error types for market data.

use folio_core::CoreError;
use thiserror::Error;

/// Result type for market data operations.
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors that can occur while building or querying market data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Symbol is not part of the universe or quote book.
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol {
        /// The symbol that was not found.
        symbol: String,
    },

    /// Symbol appears twice where it must be unique.
    #[error("Duplicate symbol: {symbol}")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },

    /// Sector name could not be recognized.
    #[error("Unknown sector: {name}")]
    UnknownSector {
        /// The unrecognized input.
        name: String,
    },

    /// Market capitalization string could not be parsed.
    #[error("Invalid market cap '{input}': {reason}")]
    InvalidMarketCap {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Quote fields are out of range.
    #[error("Invalid quote: {reason}")]
    InvalidQuote {
        /// The reason the quote is invalid.
        reason: String,
    },

    /// Price is zero, negative or otherwise unusable.
    #[error("Invalid price for {symbol}: {price}")]
    InvalidPrice {
        /// The symbol being priced.
        symbol: String,
        /// The rejected price.
        price: String,
    },

    /// A filter or classification value could not be recognized.
    #[error("Invalid {kind}: {value}")]
    InvalidValue {
        /// What was being parsed (e.g. "risk bucket").
        kind: String,
        /// The rejected input.
        value: String,
    },

    /// Underlying core type error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MarketError {
    /// Creates an unknown symbol error.
    #[must_use]
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            reason: reason.into(),
        }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(symbol: impl Into<String>, price: impl std::fmt::Display) -> Self {
        Self::InvalidPrice {
            symbol: symbol.into(),
            price: price.to_string(),
        }
    }

    /// Creates an invalid market cap error.
    #[must_use]
    pub fn invalid_market_cap(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMarketCap {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::unknown_symbol("ZZZZ");
        assert!(err.to_string().contains("ZZZZ"));

        let err = MarketError::invalid_market_cap("12X", "unknown unit");
        assert!(err.to_string().contains("12X"));
        assert!(err.to_string().contains("unknown unit"));
    }

    #[test]
    fn test_from_core_error() {
        let err: MarketError = CoreError::invalid_symbol("", "symbol is empty").into();
        assert!(matches!(err, MarketError::Core(_)));
    }
}
