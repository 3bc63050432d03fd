//! Loss aggregation and tail statistics
//!
//! Maps each simulated scenario to a portfolio dollar loss (positive = loss)
//! and reduces the empirical loss distribution to VaR and Expected
//! Shortfall at a confidence level.

use crate::error::{Result, RiskError};
use nalgebra::{DMatrix, DVector};

/// Value below which a portfolio's absolute dollar value is treated as zero
const VALUE_EPSILON: f64 = 1e-12;

/// Portfolio dollar losses, one per scenario
///
/// Exposure per instrument is `shares * last_price`; weights are exposures
/// over total value; each scenario's simple returns project onto the weights
/// and scale by `-value` so that a positive number is a loss.
pub fn portfolio_losses(
    scenarios: &DMatrix<f64>,
    last_prices: &[f64],
    shares: &[f64],
) -> Result<Vec<f64>> {
    if last_prices.len() != shares.len() || scenarios.ncols() != shares.len() {
        return Err(RiskError::InvalidParameter(format!(
            "misaligned inputs: {} scenario columns, {} prices, {} share counts",
            scenarios.ncols(),
            last_prices.len(),
            shares.len()
        )));
    }

    let exposures: Vec<f64> = shares
        .iter()
        .zip(last_prices.iter())
        .map(|(s, p)| s * p)
        .collect();
    let value: f64 = exposures.iter().sum();

    if value.abs() < VALUE_EPSILON {
        return Err(RiskError::EmptyPortfolio);
    }

    let weights = DVector::from_iterator(exposures.len(), exposures.iter().map(|e| e / value));
    let scenario_returns = scenarios * weights;

    Ok(scenario_returns.iter().map(|r| -value * r).collect())
}

/// Total portfolio dollar value (`sum of shares * price`)
pub fn portfolio_value(last_prices: &[f64], shares: &[f64]) -> f64 {
    shares
        .iter()
        .zip(last_prices.iter())
        .map(|(s, p)| s * p)
        .sum()
}

/// VaR and ES of an empirical loss distribution
///
/// VaR is the linearly interpolated `confidence`-quantile of the losses; ES
/// is the mean loss over the tail `loss >= VaR`, and equals VaR when the
/// quantile coincides with the maximum.
pub fn var_es(losses: &[f64], confidence: f64) -> Result<(f64, f64)> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(RiskError::InvalidConfidence(confidence));
    }
    if losses.is_empty() {
        return Err(RiskError::InvalidParameter(
            "empty loss distribution".to_string(),
        ));
    }

    let mut sorted = losses.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let var = interpolated_quantile(&sorted, confidence);

    let tail: Vec<f64> = sorted.iter().copied().filter(|l| *l >= var).collect();
    let es = if tail.is_empty() {
        var
    } else {
        tail.iter().sum::<f64>() / tail.len() as f64
    };

    Ok((var, es))
}

/// Linear interpolation between order statistics of a sorted sample
fn interpolated_quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = q * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
