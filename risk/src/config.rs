use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};

/// Risk engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Trailing trading days of history used to fit the return distribution
    #[serde(default = "default_lookback_days")]
    pub lookback_days: usize,

    /// Number of Monte Carlo scenarios
    #[serde(default = "default_simulations")]
    pub simulations: usize,

    /// Confidence level for VaR/ES, strictly between 0 and 1
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    /// Monte Carlo seed. Fixed so that risk figures are reproducible and
    /// diffable across runs; each computation gets its own generator seeded
    /// from this value, never a shared global.
    #[serde(default)]
    pub seed: u64,

    /// Maximum age, in days, of the most recent quote relative to the as-of
    /// date. Quotes older than this are rejected as stale.
    #[serde(default = "default_max_quote_age_days")]
    pub max_quote_age_days: i64,
}

fn default_lookback_days() -> usize {
    60
}

fn default_simulations() -> usize {
    1000
}

fn default_confidence() -> f64 {
    0.95
}

fn default_max_quote_age_days() -> i64 {
    1
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            simulations: default_simulations(),
            confidence: default_confidence(),
            seed: 0,
            max_quote_age_days: default_max_quote_age_days(),
        }
    }
}

impl RiskConfig {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.confidence <= 0.0 || self.confidence >= 1.0 {
            return Err(RiskError::InvalidConfidence(self.confidence));
        }
        if self.lookback_days == 0 {
            return Err(RiskError::InvalidParameter(
                "lookback_days must be positive".to_string(),
            ));
        }
        if self.simulations == 0 {
            return Err(RiskError::InvalidParameter(
                "simulations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
