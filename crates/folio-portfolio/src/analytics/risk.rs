//! Portfolio risk approximations.
//!
//! Provides aggregated risk metrics including:
//! - Market-value weighted beta and volatility
//! - Parametric one-day VaR at 95%
//! - Sharpe and max-drawdown placeholders derived from volatility
//!
//! These are display-grade approximations, not statistical estimates. In
//! particular `sharpe_approx` is a linear function of volatility and does
//! not involve returns or a risk-free rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::ValuationConfig;
use crate::valuation::{total_market_value, LotValuation};

/// Aggregated risk metrics for a portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Market-value weighted beta.
    pub weighted_beta: Decimal,

    /// Market-value weighted volatility, in percent.
    pub weighted_volatility: Decimal,

    /// Estimated 95% loss threshold, reported as a non-positive amount.
    pub value_at_risk_95: Decimal,

    /// `max(0, baseline - volatility / divisor)`; a placeholder, not a Sharpe ratio.
    pub sharpe_approx: Decimal,

    /// `volatility * drawdown_factor`, in percent.
    pub max_drawdown_approx: Decimal,
}

/// Calculates market-value weighted beta.
///
/// ## Formula
///
/// ```text
/// β_p = Σ(β_i × MV_i) / Σ MV_i
/// ```
///
/// Returns zero when total market value is zero.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` if a weighted sum leaves the `Decimal` range.
pub fn weighted_beta(valuations: &[LotValuation]) -> PortfolioResult<Decimal> {
    weighted_average(valuations, |v| v.beta, "weighted beta")
}

/// Calculates market-value weighted volatility (percent).
///
/// Returns zero when total market value is zero.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` if a weighted sum leaves the `Decimal` range.
pub fn weighted_volatility(valuations: &[LotValuation]) -> PortfolioResult<Decimal> {
    weighted_average(valuations, |v| v.volatility, "weighted volatility")
}

/// Calculates all risk metrics for a set of valued lots.
///
/// An empty set yields all-zero metrics.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` if an aggregate leaves the `Decimal` range.
pub fn calculate_risk_metrics(
    valuations: &[LotValuation],
    config: &ValuationConfig,
) -> PortfolioResult<RiskMetrics> {
    if valuations.is_empty() {
        return Ok(RiskMetrics::default());
    }

    let total_value = total_market_value(valuations)?;
    let weighted_beta = weighted_beta(valuations)?;
    let weighted_volatility = weighted_volatility(valuations)?;

    let loss = (weighted_volatility / Decimal::ONE_HUNDRED)
        .checked_mul(config.var_z_score)
        .and_then(|scale| total_value.checked_mul(scale))
        .ok_or_else(|| PortfolioError::overflow("value at risk"))?;
    let value_at_risk_95 = if loss.is_zero() { Decimal::ZERO } else { -loss };

    let sharpe_approx = weighted_volatility
        .checked_div(config.sharpe_volatility_divisor)
        .and_then(|penalty| config.sharpe_baseline.checked_sub(penalty))
        .ok_or_else(|| PortfolioError::overflow("sharpe approximation"))?
        .max(Decimal::ZERO);
    let max_drawdown_approx = weighted_volatility
        .checked_mul(config.drawdown_factor)
        .ok_or_else(|| PortfolioError::overflow("max drawdown"))?;

    Ok(RiskMetrics {
        weighted_beta,
        weighted_volatility,
        value_at_risk_95,
        sharpe_approx,
        max_drawdown_approx,
    })
}

fn weighted_average(
    valuations: &[LotValuation],
    metric: impl Fn(&LotValuation) -> Decimal,
    quantity: &str,
) -> PortfolioResult<Decimal> {
    let (sum_weighted, sum_weights) = valuations.iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(sw, w), v| {
            let sw = metric(v)
                .checked_mul(v.market_value)
                .and_then(|x| sw.checked_add(x))?;
            Some((sw, w.checked_add(v.market_value)?))
        },
    )
    .ok_or_else(|| PortfolioError::overflow(quantity))?;

    if sum_weights.is_zero() {
        Ok(Decimal::ZERO)
    } else {
        sum_weighted
            .checked_div(sum_weights)
            .ok_or_else(|| PortfolioError::overflow(quantity))
    }
}
