//! Reference stock universe.
//!
//! The universe is the set of tradeable symbols a ledger accepts. Each
//! entry carries descriptive data (company, sector, market cap) and a
//! reference quote used when no external quote book is supplied.

use std::collections::HashMap;

use folio_core::Symbol;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, MarketResult};
use crate::market_cap::MarketCap;
use crate::quote::PriceQuote;
use crate::sector::Sector;

/// Lookup seam between the ledger and whatever knows the tradeable symbols.
pub trait SecurityDirectory {
    /// Returns true if the symbol can be held.
    fn contains(&self, symbol: &str) -> bool;

    /// Returns the company name for a symbol, if known.
    fn company_name(&self, symbol: &str) -> Option<&str>;
}

/// One entry of the stock universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockProfile {
    /// Ticker symbol.
    pub symbol: Symbol,

    /// Company name.
    pub name: String,

    /// Sector classification.
    pub sector: Sector,

    /// Market capitalization.
    pub market_cap: MarketCap,

    /// Reference share price.
    pub reference_price: Decimal,

    /// Reference beta against the broad market.
    pub beta: Decimal,

    /// Reference annualized volatility, in percent.
    pub volatility: Decimal,
}

impl StockProfile {
    /// Builds the quote implied by the reference figures.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidQuote` if the reference figures are out
    /// of range (non-positive price or negative volatility).
    pub fn reference_quote(&self) -> MarketResult<PriceQuote> {
        PriceQuote::new(self.reference_price, self.beta, self.volatility, self.sector)
    }
}

/// Ordered collection of stock profiles, indexed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StockUniverse {
    profiles: Vec<StockProfile>,
    index: HashMap<Symbol, usize>,
}

/// (symbol, company, sector, market cap, price, beta, volatility)
type ReferenceRow = (&'static str, &'static str, Sector, &'static str, Decimal, Decimal, Decimal);

const REFERENCE_ROWS: [ReferenceRow; 15] = [
    ("AAPL", "Apple Inc.", Sector::Technology, "3.64T", dec!(245.50), dec!(1.20), dec!(25.0)),
    ("MSFT", "Microsoft Corporation", Sector::Technology, "3.85T", dec!(517.93), dec!(1.10), dec!(22.0)),
    ("NVDA", "NVIDIA Corporation", Sector::Technology, "4.29T", dec!(176.67), dec!(1.75), dec!(48.0)),
    ("GOOGL", "Alphabet Inc.", Sector::Technology, "3.08T", dec!(254.72), dec!(1.05), dec!(27.0)),
    ("AMZN", "Amazon.com Inc.", Sector::ConsumerDiscretionary, "2.47T", dec!(231.48), dec!(1.30), dec!(31.0)),
    ("META", "Meta Platforms Inc.", Sector::Technology, "1.96T", dec!(778.38), dec!(1.25), dec!(36.0)),
    ("TSLA", "Tesla Inc.", Sector::ConsumerDiscretionary, "1.42T", dec!(426.07), dec!(2.05), dec!(58.0)),
    ("BRK.B", "Berkshire Hathaway Inc.", Sector::Financial, "1.06T", dec!(492.85), dec!(0.85), dec!(16.0)),
    ("JPM", "JPMorgan Chase & Co.", Sector::Financial, "866B", dec!(314.78), dec!(1.10), dec!(23.0)),
    ("V", "Visa Inc.", Sector::Financial, "658B", dec!(341.61), dec!(0.95), dec!(19.0)),
    ("UNH", "UnitedHealth Group Inc.", Sector::Healthcare, "524B", dec!(524.12), dec!(0.60), dec!(24.0)),
    ("JNJ", "Johnson & Johnson", Sector::Healthcare, "378B", dec!(162.85), dec!(0.55), dec!(14.0)),
    ("WMT", "Walmart Inc.", Sector::ConsumerStaples, "692B", dec!(95.63), dec!(0.50), dec!(15.0)),
    ("MA", "Mastercard Inc.", Sector::Financial, "413B", dec!(527.89), dec!(1.05), dec!(21.0)),
    ("PG", "Procter & Gamble Co.", Sector::ConsumerStaples, "386B", dec!(166.34), dec!(0.45), dec!(13.0)),
];

impl StockUniverse {
    /// Creates a universe from profiles, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::DuplicateSymbol` if a symbol appears twice.
    pub fn new(profiles: Vec<StockProfile>) -> MarketResult<Self> {
        let mut index = HashMap::with_capacity(profiles.len());
        for (i, profile) in profiles.iter().enumerate() {
            if index.insert(profile.symbol.clone(), i).is_some() {
                return Err(MarketError::DuplicateSymbol {
                    symbol: profile.symbol.to_string(),
                });
            }
        }
        Ok(Self { profiles, index })
    }

    /// Returns the built-in fifteen-name large-cap universe.
    ///
    /// Reference beta and volatility figures are fixed so that valuations
    /// and screens are reproducible.
    #[must_use]
    pub fn reference() -> Self {
        // Constant table; test_reference_universe_builds checks every row
        Self::from_rows(&REFERENCE_ROWS).expect("reference universe table is well-formed")
    }

    fn from_rows(rows: &[ReferenceRow]) -> MarketResult<Self> {
        let profiles = rows
            .iter()
            .map(|&(symbol, name, sector, cap, price, beta, volatility)| {
                Ok(StockProfile {
                    symbol: Symbol::new(symbol)?,
                    name: name.to_string(),
                    sector,
                    market_cap: cap.parse()?,
                    reference_price: price,
                    beta,
                    volatility,
                })
            })
            .collect::<MarketResult<Vec<_>>>()?;
        Self::new(profiles)
    }

    /// Looks up a profile by symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&StockProfile> {
        let key = symbol.trim().to_ascii_uppercase();
        self.index.get(key.as_str()).map(|&i| &self.profiles[i])
    }

    /// Returns true if the symbol is part of the universe.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Iterates over profiles in universe order.
    pub fn iter(&self) -> impl Iterator<Item = &StockProfile> {
        self.profiles.iter()
    }

    /// Returns the number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if the universe has no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns the distinct sectors present, in universe order.
    #[must_use]
    pub fn sectors(&self) -> Vec<Sector> {
        let mut seen = Vec::new();
        for profile in &self.profiles {
            if !seen.contains(&profile.sector) {
                seen.push(profile.sector);
            }
        }
        seen
    }

    /// Returns profiles in the given sector, in universe order.
    #[must_use]
    pub fn in_sector(&self, sector: Sector) -> Vec<&StockProfile> {
        self.profiles.iter().filter(|p| p.sector == sector).collect()
    }

    /// Case-insensitive substring search over symbol, company and sector name.
    ///
    /// A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&StockProfile> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.profiles
            .iter()
            .filter(|p| {
                p.symbol.as_str().to_lowercase().contains(&needle)
                    || p.name.to_lowercase().contains(&needle)
                    || p.sector.name().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl SecurityDirectory for StockUniverse {
    fn contains(&self, symbol: &str) -> bool {
        StockUniverse::contains(self, symbol)
    }

    fn company_name(&self, symbol: &str) -> Option<&str> {
        self.get(symbol).map(|p| p.name.as_str())
    }
}

impl<'a> IntoIterator for &'a StockUniverse {
    type Item = &'a StockProfile;
    type IntoIter = std::slice::Iter<'a, StockProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
