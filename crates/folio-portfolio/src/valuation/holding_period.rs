//! Holding-period labels.

use folio_core::Date;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elapsed time between purchase and valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingPeriod {
    /// Whole calendar days elapsed.
    pub days: u64,

    /// Display label: `"N days"`, `"N months"` or `"X.Y years"`.
    pub label: String,
}

impl fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Computes the holding period of a lot bought on `purchase_date`.
///
/// Under 30 days the label counts days; under 365 it counts 30-day months
/// (floored); beyond that it reports years to one decimal.
///
/// # Example
///
/// ```rust
/// use folio_core::Date;
/// use folio_portfolio::holding_period;
///
/// let bought = Date::parse("2024-09-13").unwrap();
/// let as_of = Date::parse("2025-10-18").unwrap();
/// let period = holding_period(bought, as_of);
/// assert_eq!(period.days, 400);
/// assert_eq!(period.label, "1.1 years");
/// ```
#[must_use]
pub fn holding_period(purchase_date: Date, as_of: Date) -> HoldingPeriod {
    let days = purchase_date.days_between(&as_of).unsigned_abs();

    let label = if days < 30 {
        format!("{days} days")
    } else if days < 365 {
        format!("{} months", days / 30)
    } else {
        let years = (Decimal::from(days) / dec!(365))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{years:.1} years")
    };

    HoldingPeriod { days, label }
}
