//! Volatility-based risk allocation.

use folio_market::{RiskBucket, RiskThresholds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sector::AllocationBucket;
use crate::error::PortfolioResult;
use crate::valuation::{total_market_value, LotValuation};

/// Distribution of lots across the three risk buckets.
///
/// All three buckets are always present, empty or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAllocation {
    /// Volatility below the low ceiling.
    pub low: AllocationBucket,

    /// Volatility between the thresholds.
    pub medium: AllocationBucket,

    /// Volatility at or above the high floor.
    pub high: AllocationBucket,

    /// Total portfolio market value.
    pub total_market_value: Decimal,
}

impl RiskAllocation {
    /// Returns the bucket for a risk class.
    #[must_use]
    pub fn get(&self, bucket: RiskBucket) -> &AllocationBucket {
        match bucket {
            RiskBucket::Low => &self.low,
            RiskBucket::Medium => &self.medium,
            RiskBucket::High => &self.high,
        }
    }

    fn get_mut(&mut self, bucket: RiskBucket) -> &mut AllocationBucket {
        match bucket {
            RiskBucket::Low => &mut self.low,
            RiskBucket::Medium => &mut self.medium,
            RiskBucket::High => &mut self.high,
        }
    }

    /// Returns every bucket from lowest to highest risk.
    #[must_use]
    pub fn buckets(&self) -> [(RiskBucket, &AllocationBucket); 3] {
        [
            (RiskBucket::Low, &self.low),
            (RiskBucket::Medium, &self.medium),
            (RiskBucket::High, &self.high),
        ]
    }
}

/// Buckets valued lots by quoted volatility.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` if the total market value leaves the
/// `Decimal` range.
pub fn allocate_by_risk(
    valuations: &[LotValuation],
    thresholds: &RiskThresholds,
) -> PortfolioResult<RiskAllocation> {
    let mut allocation = RiskAllocation {
        total_market_value: total_market_value(valuations)?,
        ..RiskAllocation::default()
    };

    for v in valuations {
        allocation
            .get_mut(RiskBucket::classify(v.volatility, thresholds))
            .add(v.market_value);
    }

    let total = allocation.total_market_value;
    for bucket in RiskBucket::all() {
        allocation.get_mut(*bucket).finish(total);
    }
    Ok(allocation)
}
