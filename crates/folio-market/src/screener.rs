//! Universe screening by sector, size and risk.

use serde::{Deserialize, Serialize};

use crate::market_cap::MarketCapClass;
use crate::quote::QuoteBook;
use crate::risk::{RiskBucket, RiskThresholds};
use crate::sector::Sector;
use crate::universe::{StockProfile, StockUniverse};

/// Conjunctive screen criteria. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenerFilter {
    /// Required sector.
    pub sector: Option<Sector>,

    /// Required market-cap class.
    pub market_cap: Option<MarketCapClass>,

    /// Required risk bucket.
    pub risk: Option<RiskBucket>,

    /// Cut-offs used to derive each stock's risk bucket; a volatility equal
    /// to a cut-off falls in the lower bucket.
    #[serde(default)]
    pub thresholds: RiskThresholds,
}

impl ScreenerFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one sector.
    #[must_use]
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }

    /// Restricts to one market-cap class.
    #[must_use]
    pub fn with_market_cap(mut self, class: MarketCapClass) -> Self {
        self.market_cap = Some(class);
        self
    }

    /// Restricts to one risk bucket.
    #[must_use]
    pub fn with_risk(mut self, bucket: RiskBucket) -> Self {
        self.risk = Some(bucket);
        self
    }

    /// Overrides the risk cut-offs.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Returns true if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sector.is_none() && self.market_cap.is_none() && self.risk.is_none()
    }

    fn matches(&self, profile: &StockProfile, quotes: &QuoteBook) -> bool {
        if self.sector.is_some_and(|s| s != profile.sector) {
            return false;
        }
        if self
            .market_cap
            .is_some_and(|c| c != profile.market_cap.class())
        {
            return false;
        }
        if let Some(bucket) = self.risk {
            let volatility = quotes
                .get(profile.symbol.as_str())
                .map_or(profile.volatility, |q| q.volatility);
            if RiskBucket::classify_inclusive(volatility, &self.thresholds) != bucket {
                return false;
            }
        }
        true
    }
}

/// Returns the profiles matching every criterion, in universe order.
///
/// Risk uses the quote book's volatility for a symbol, falling back to the
/// profile's reference volatility when the book has no quote.
#[must_use]
pub fn screen<'a>(
    universe: &'a StockUniverse,
    quotes: &QuoteBook,
    filter: &ScreenerFilter,
) -> Vec<&'a StockProfile> {
    universe
        .iter()
        .filter(|profile| filter.matches(profile, quotes))
        .collect()
}
