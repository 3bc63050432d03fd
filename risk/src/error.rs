//! Error types for the risk engine

use mcvar_store::StoreError;
use thiserror::Error;

/// Errors that can occur while computing portfolio VaR/ES
///
/// Every variant aborts the whole computation. The engine never substitutes
/// defaults, clips NaNs or reports risk for a subset of the portfolio.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Malformed portfolio: {0}")]
    MalformedPortfolio(String),

    #[error("Insufficient history for {instrument}: need {need} observations, found {have}")]
    InsufficientHistory {
        instrument: String,
        have: usize,
        need: usize,
    },

    #[error(
        "Stale quote for {instrument}: last observation at {last_ts} is more than \
         {max_age_ms} ms before as-of {as_of}"
    )]
    StaleQuote {
        instrument: String,
        last_ts: i64,
        as_of: i64,
        max_age_ms: i64,
    },

    #[error("Degenerate covariance matrix: {0}")]
    DegenerateCovariance(String),

    #[error("Empty portfolio: total portfolio value is zero")]
    EmptyPortfolio,

    #[error("Invalid confidence level: {0} (must be strictly between 0 and 1)")]
    InvalidConfidence(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Price store error: {0}")]
    Store(#[from] StoreError),

    #[error("History task failed: {0}")]
    HistoryTask(String),
}

/// Result type for risk operations
pub type Result<T> = std::result::Result<T, RiskError>;
