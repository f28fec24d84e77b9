//! Sector-based allocation.
//!
//! Provides distribution analysis by quoted sector.

use folio_market::Sector;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PortfolioResult;
use crate::valuation::{total_market_value, LotValuation};

/// Aggregated value of one bucket of lots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationBucket {
    /// Number of lots in this bucket.
    pub count: usize,

    /// Total market value.
    pub market_value: Decimal,

    /// Weight as percentage of total (0-100).
    pub weight_pct: Decimal,
}

impl AllocationBucket {
    /// Returns true if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub(crate) fn add(&mut self, market_value: Decimal) {
        self.count += 1;
        self.market_value += market_value;
    }

    pub(crate) fn finish(&mut self, total_market_value: Decimal) {
        self.weight_pct = weight_pct(self.market_value, total_market_value);
    }
}

/// Distribution of lots by sector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorAllocation {
    /// Buckets by sector; only sectors held appear.
    pub by_sector: BTreeMap<Sector, AllocationBucket>,

    /// Total portfolio market value.
    pub total_market_value: Decimal,
}

impl SectorAllocation {
    /// Returns the bucket for a specific sector.
    #[must_use]
    pub fn get(&self, sector: Sector) -> Option<&AllocationBucket> {
        self.by_sector.get(&sector)
    }

    /// Returns the number of sectors held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_sector.len()
    }

    /// Returns true if no sector is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_sector.is_empty()
    }

    /// Returns the combined weight of defensive sectors.
    #[must_use]
    pub fn defensive_weight(&self) -> Decimal {
        self.by_sector
            .iter()
            .filter(|(s, _)| s.is_defensive())
            .map(|(_, b)| b.weight_pct)
            .sum()
    }

    /// Returns all sectors with their buckets, sorted by weight descending.
    #[must_use]
    pub fn sorted_by_weight(&self) -> Vec<(Sector, &AllocationBucket)> {
        let mut result: Vec<_> = self.by_sector.iter().map(|(s, b)| (*s, b)).collect();
        result.sort_by(|a, b| b.1.weight_pct.cmp(&a.1.weight_pct));
        result
    }
}

/// Buckets valued lots by their quoted sector.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` if the total market value leaves the
/// `Decimal` range.
pub fn allocate_by_sector(valuations: &[LotValuation]) -> PortfolioResult<SectorAllocation> {
    if valuations.is_empty() {
        return Ok(SectorAllocation::default());
    }

    // Bucket sums of non-negative values never exceed this total
    let total_market_value = total_market_value(valuations)?;

    let mut by_sector: BTreeMap<Sector, AllocationBucket> = BTreeMap::new();
    for v in valuations {
        by_sector.entry(v.sector).or_default().add(v.market_value);
    }
    for bucket in by_sector.values_mut() {
        bucket.finish(total_market_value);
    }

    Ok(SectorAllocation {
        by_sector,
        total_market_value,
    })
}

/// Percentage of `part` in `total`, zero when the total is zero.
fn weight_pct(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part / total * Decimal::ONE_HUNDRED
    }
}
