//! Error types for the ledger and valuation engine.

use folio_core::CoreError;
use thiserror::Error;

use crate::types::LotId;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Coarse classification of a [`PortfolioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad lot or configuration input.
    Validation,
    /// A referenced lot does not exist.
    NotFound,
    /// Valuation was requested for a symbol with no quote.
    MissingQuote,
}

/// Errors that can occur during ledger mutation or valuation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// A lot field failed validation.
    #[error("Invalid lot {field}: {reason}")]
    InvalidLot {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Symbol is not part of the reference universe.
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol {
        /// The symbol that was rejected.
        symbol: String,
    },

    /// Purchase date could not be parsed.
    #[error("Invalid purchase date '{input}'")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// No lot with this id is held.
    #[error("Lot not found: {id}")]
    LotNotFound {
        /// The id that was not found.
        id: LotId,
    },

    /// No quote was supplied for a held symbol.
    #[error("Missing quote for {symbol}")]
    MissingQuote {
        /// The unquoted symbol.
        symbol: String,
    },

    /// Engine configuration is out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// An amount fell outside the range `Decimal` can represent.
    #[error("Arithmetic overflow computing {quantity}")]
    Overflow {
        /// The quantity being computed.
        quantity: String,
    },

    /// CSV writing failed.
    #[error("Export failed: {reason}")]
    Export {
        /// The underlying failure.
        reason: String,
    },

    /// Underlying core type error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PortfolioError {
    /// Creates an invalid lot error.
    #[must_use]
    pub fn invalid_lot(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLot {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown symbol error.
    #[must_use]
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    /// Creates a missing quote error.
    #[must_use]
    pub fn missing_quote(symbol: impl Into<String>) -> Self {
        Self::MissingQuote {
            symbol: symbol.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an arithmetic overflow error.
    #[must_use]
    pub fn overflow(quantity: impl Into<String>) -> Self {
        Self::Overflow {
            quantity: quantity.into(),
        }
    }

    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LotNotFound { .. } => ErrorKind::NotFound,
            Self::MissingQuote { .. } => ErrorKind::MissingQuote,
            Self::InvalidLot { .. }
            | Self::UnknownSymbol { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidConfig { .. }
            | Self::Overflow { .. }
            | Self::Export { .. }
            | Self::Core(_) => ErrorKind::Validation,
        }
    }
}

impl From<csv::Error> for PortfolioError {
    fn from(err: csv::Error) -> Self {
        Self::Export {
            reason: err.to_string(),
        }
    }
}
