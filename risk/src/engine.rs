//! Risk computation orchestration
//!
//! Fans history extraction out across instruments, fits and samples the
//! joint return distribution, and reduces the simulated losses to VaR/ES.
//! Any per-instrument failure aborts the whole computation: VaR for a
//! subset of holdings is not a meaningful approximation of the whole.

use crate::aggregate::{portfolio_losses, portfolio_value, var_es};
use crate::config::RiskConfig;
use crate::error::{Result, RiskError};
use crate::portfolio::Portfolio;
use crate::returns::{extract_returns, ReturnSeries};
use crate::scenario::ScenarioGenerator;
use chrono::{DateTime, Utc};
use mcvar_store::PriceStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Result of a VaR/ES computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Value-at-Risk at `confidence`, a positive dollar loss magnitude
    pub value_at_risk: f64,

    /// Expected Shortfall (mean tail loss beyond VaR)
    pub expected_shortfall: f64,

    /// Total portfolio dollar value at the as-of date
    pub portfolio_value: f64,

    /// Valuation date the risk was computed for
    pub as_of: DateTime<Utc>,

    /// Confidence level used
    pub confidence: f64,

    /// Number of Monte Carlo scenarios used
    pub simulations: usize,
}

/// Monte Carlo VaR/ES engine
///
/// A pure function of (portfolio, as-of date, config) over an immutable
/// price history snapshot. Every call constructs fresh state; concurrent
/// computations never share generator state.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Create an engine, validating the configuration up front
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Compute VaR and ES for a portfolio as of a valuation date
    pub async fn compute(
        &self,
        store: Arc<dyn PriceStore>,
        portfolio: &Portfolio,
        as_of: DateTime<Utc>,
    ) -> Result<RiskReport> {
        if portfolio.is_empty() {
            return Err(RiskError::EmptyPortfolio);
        }

        let as_of_ms = as_of.timestamp_millis();
        let series = self.fetch_histories(store, portfolio, as_of_ms).await?;

        let generator = ScenarioGenerator::new(self.config.simulations, self.config.seed);
        let scenarios = generator.generate(&series)?;

        let last_prices: Vec<f64> = series.iter().map(|s| s.last_price).collect();
        let shares = portfolio.shares();

        let losses = portfolio_losses(&scenarios, &last_prices, &shares)?;
        let (var, es) = var_es(&losses, self.config.confidence)?;

        Ok(RiskReport {
            value_at_risk: var,
            expected_shortfall: es,
            portfolio_value: portfolio_value(&last_prices, &shares),
            as_of,
            confidence: self.config.confidence,
            simulations: self.config.simulations,
        })
    }

    /// Fan out one history-extraction task per holding, join in holding order
    async fn fetch_histories(
        &self,
        store: Arc<dyn PriceStore>,
        portfolio: &Portfolio,
        as_of_ms: i64,
    ) -> Result<Vec<ReturnSeries>> {
        let mut handles = Vec::with_capacity(portfolio.len());

        for holding in portfolio.holdings() {
            let store = Arc::clone(&store);
            let instrument = holding.instrument.clone();
            let lookback = self.config.lookback_days;
            let max_age = self.config.max_quote_age_days;

            handles.push(tokio::spawn(async move {
                extract_returns(store.as_ref(), &instrument, as_of_ms, lookback, max_age).await
            }));
        }

        let mut series = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .map_err(|e| RiskError::HistoryTask(e.to_string()))?;
            series.push(result?);
        }

        Ok(series)
    }
}

/// Compute `(VaR, ES)` for a holdings file
///
/// The single public entry point the CLI and the explain glue call.
pub async fn compute_var_es(
    store: Arc<dyn PriceStore>,
    portfolio_path: impl AsRef<Path>,
    as_of: DateTime<Utc>,
    config: &RiskConfig,
) -> Result<(f64, f64)> {
    let portfolio = Portfolio::from_path(portfolio_path)?;
    let engine = RiskEngine::new(config.clone())?;
    let report = engine.compute(store, &portfolio, as_of).await?;
    Ok((report.value_at_risk, report.expected_shortfall))
}
