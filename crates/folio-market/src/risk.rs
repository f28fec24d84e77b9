//! Volatility-based risk classification.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{MarketError, MarketResult};

/// Coarse risk class derived from annualized volatility (in percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBucket {
    /// Volatility below the low ceiling
    Low,
    /// Volatility between the low ceiling and the high floor
    Medium,
    /// Volatility at or above the high floor
    High,
}

impl RiskBucket {
    /// Returns all buckets from lowest to highest risk.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns the chart label used for allocation displays.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    /// Classifies a volatility figure (percent) against the thresholds.
    #[must_use]
    pub fn classify(volatility: Decimal, thresholds: &RiskThresholds) -> Self {
        if volatility < thresholds.low_ceiling {
            Self::Low
        } else if volatility < thresholds.high_floor {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Classifies with each threshold belonging to the bucket below it.
    ///
    /// Screening uses this form: volatility of exactly 20 is Low and exactly
    /// 35 is Medium under the default thresholds.
    #[must_use]
    pub fn classify_inclusive(volatility: Decimal, thresholds: &RiskThresholds) -> Self {
        if volatility <= thresholds.low_ceiling {
            Self::Low
        } else if volatility <= thresholds.high_floor {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RiskBucket {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(MarketError::invalid_value("risk bucket", s)),
        }
    }
}

/// Volatility cut-offs separating the risk buckets.
///
/// `Low` is `volatility < low_ceiling`, `High` is `volatility >= high_floor`,
/// everything in between is `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Exclusive upper bound of the low bucket.
    pub low_ceiling: Decimal,

    /// Inclusive lower bound of the high bucket.
    pub high_floor: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_ceiling: dec!(20),
            high_floor: dec!(35),
        }
    }
}

impl RiskThresholds {
    /// Creates thresholds, rejecting an inverted or negative range.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidValue` if `low_ceiling` is negative or
    /// greater than `high_floor`.
    pub fn new(low_ceiling: Decimal, high_floor: Decimal) -> MarketResult<Self> {
        let thresholds = Self {
            low_ceiling,
            high_floor,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks that the thresholds describe a non-empty ordered range.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidValue` for an inverted or negative range.
    pub fn validate(&self) -> MarketResult<()> {
        if self.low_ceiling.is_sign_negative() || self.low_ceiling > self.high_floor {
            return Err(MarketError::invalid_value(
                "risk thresholds",
                format!("{}..{}", self.low_ceiling, self.high_floor),
            ));
        }
        Ok(())
    }
}
