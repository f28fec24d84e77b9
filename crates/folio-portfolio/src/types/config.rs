//! Configuration for portfolio valuation.

use folio_market::RiskThresholds;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Parameters of the risk approximations used by the valuation engine.
///
/// The defaults reproduce the dashboard figures: a one-tailed 95% normal
/// factor for VaR, a Sharpe placeholder of `1.5 - vol/20`, and a drawdown
/// of `0.6 * vol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Normal quantile applied to weighted volatility for VaR.
    pub var_z_score: Decimal,

    /// Sharpe approximation at zero volatility.
    pub sharpe_baseline: Decimal,

    /// Volatility points that cost one unit of Sharpe.
    pub sharpe_volatility_divisor: Decimal,

    /// Fraction of weighted volatility reported as max drawdown.
    pub drawdown_factor: Decimal,

    /// Volatility cut-offs for the risk allocation.
    pub risk_thresholds: RiskThresholds,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            var_z_score: dec!(1.645),
            sharpe_baseline: dec!(1.5),
            sharpe_volatility_divisor: dec!(20),
            drawdown_factor: dec!(0.6),
            risk_thresholds: RiskThresholds::default(),
        }
    }
}

impl ValuationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the VaR z-score.
    #[must_use]
    pub fn with_var_z_score(mut self, z: Decimal) -> Self {
        self.var_z_score = z;
        self
    }

    /// Sets the Sharpe baseline.
    #[must_use]
    pub fn with_sharpe_baseline(mut self, baseline: Decimal) -> Self {
        self.sharpe_baseline = baseline;
        self
    }

    /// Sets the Sharpe volatility divisor.
    #[must_use]
    pub fn with_sharpe_volatility_divisor(mut self, divisor: Decimal) -> Self {
        self.sharpe_volatility_divisor = divisor;
        self
    }

    /// Sets the drawdown factor.
    #[must_use]
    pub fn with_drawdown_factor(mut self, factor: Decimal) -> Self {
        self.drawdown_factor = factor;
        self
    }

    /// Sets the risk thresholds.
    #[must_use]
    pub fn with_risk_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.risk_thresholds = thresholds;
        self
    }

    /// Checks that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidConfig` for a non-positive z-score or
    /// divisor, a negative drawdown factor, or inverted risk thresholds.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.var_z_score <= Decimal::ZERO {
            return Err(PortfolioError::invalid_config("var_z_score must be positive"));
        }
        if self.sharpe_volatility_divisor <= Decimal::ZERO {
            return Err(PortfolioError::invalid_config(
                "sharpe_volatility_divisor must be positive",
            ));
        }
        if self.drawdown_factor < Decimal::ZERO {
            return Err(PortfolioError::invalid_config(
                "drawdown_factor cannot be negative",
            ));
        }
        self.risk_thresholds
            .validate()
            .map_err(|e| PortfolioError::invalid_config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ValuationConfig::default();
        assert_eq!(config.var_z_score, dec!(1.645));
        assert_eq!(config.sharpe_baseline, dec!(1.5));
        assert_eq!(config.sharpe_volatility_divisor, dec!(20));
        assert_eq!(config.drawdown_factor, dec!(0.6));
        assert_eq!(config.risk_thresholds.low_ceiling, dec!(20));
        assert_eq!(config.risk_thresholds.high_floor, dec!(35));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ValuationConfig::new()
            .with_var_z_score(dec!(2.326))
            .with_sharpe_baseline(dec!(2))
            .with_sharpe_volatility_divisor(dec!(10))
            .with_drawdown_factor(dec!(0.5));

        assert_eq!(config.var_z_score, dec!(2.326));
        assert_eq!(config.sharpe_baseline, dec!(2));
        assert_eq!(config.sharpe_volatility_divisor, dec!(10));
        assert_eq!(config.drawdown_factor, dec!(0.5));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(ValuationConfig::new().with_var_z_score(dec!(0)).validate().is_err());
        assert!(ValuationConfig::new()
            .with_sharpe_volatility_divisor(dec!(-1))
            .validate()
            .is_err());
        assert!(ValuationConfig::new()
            .with_drawdown_factor(dec!(-0.1))
            .validate()
            .is_err());

        let inverted = RiskThresholds {
            low_ceiling: dec!(40),
            high_floor: dec!(10),
        };
        assert!(ValuationConfig::new()
            .with_risk_thresholds(inverted)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ValuationConfig = serde_json::from_str(r#"{"var_z_score": "2.326"}"#).unwrap();
        assert_eq!(config.var_z_score, dec!(2.326));
        assert_eq!(config.drawdown_factor, dec!(0.6));
    }
}
