//! Historical log-return extraction
//!
//! Pulls the `lookback + 1` most recent closes at or before the as-of
//! instant and derives `lookback` consecutive log-returns. The window policy
//! is inclusive: a quote stamped exactly at the as-of instant is eligible,
//! nothing after it ever is.
//!
//! The boundary checks here are the safety-critical part of the pipeline:
//! they stop the engine from silently fitting a distribution to stale or
//! look-ahead-biased data.

use crate::error::{Result, RiskError};
use mcvar_store::{PriceStore, MS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Extracted history for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    /// Instrument identifier
    pub instrument: String,

    /// Consecutive log-returns `ln(p[i]) - ln(p[i-1])`, oldest first
    pub log_returns: Vec<f64>,

    /// Most recent close at or before the as-of instant
    pub last_price: f64,

    /// Timestamp of the most recent close, milliseconds since epoch UTC
    pub last_ts: i64,
}

/// Extract a log-return window for one instrument
///
/// Fails with [`RiskError::InsufficientHistory`] when fewer than
/// `lookback + 1` observations exist at or before `as_of`, and with
/// [`RiskError::StaleQuote`] when the most recent observation is more than
/// `max_quote_age_days` before `as_of`.
pub async fn extract_returns(
    store: &dyn PriceStore,
    instrument: &str,
    as_of: i64,
    lookback: usize,
    max_quote_age_days: i64,
) -> Result<ReturnSeries> {
    let need = lookback + 1;
    let mut points = store.closes_at_or_before(instrument, as_of, need).await?;

    if points.len() < need {
        return Err(RiskError::InsufficientHistory {
            instrument: instrument.to_string(),
            have: points.len(),
            need,
        });
    }

    // The store contract says newest first, but the core does not rely on it.
    points.sort_by_key(|p| p.ts_utc);

    let last = points[points.len() - 1];
    let max_age_ms = max_quote_age_days * MS_PER_DAY;
    if as_of - last.ts_utc > max_age_ms {
        return Err(RiskError::StaleQuote {
            instrument: instrument.to_string(),
            last_ts: last.ts_utc,
            as_of,
            max_age_ms,
        });
    }

    let log_returns = points
        .windows(2)
        .map(|w| (w[1].close / w[0].close).ln())
        .collect();

    Ok(ReturnSeries {
        instrument: instrument.to_string(),
        log_returns,
        last_price: last.close,
        last_ts: last.ts_utc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcvar_store::MemoryPriceStore;

    fn seeded_store(instrument: &str, last_ts: i64, closes: &[f64]) -> MemoryPriceStore {
        let store = MemoryPriceStore::new();
        store.insert_daily_series(instrument, last_ts, closes);
        store
    }

    #[tokio::test]
    async fn test_extracts_log_returns_and_last_price() {
        let as_of = 100 * MS_PER_DAY;
        let store = seeded_store("ACME", as_of, &[100.0, 110.0, 99.0]);

        let series = extract_returns(&store, "ACME", as_of, 2, 1).await.unwrap();

        assert_eq!(series.log_returns.len(), 2);
        assert!((series.log_returns[0] - (110.0f64 / 100.0).ln()).abs() < 1e-12);
        assert!((series.log_returns[1] - (99.0f64 / 110.0).ln()).abs() < 1e-12);
        assert_eq!(series.last_price, 99.0);
        assert_eq!(series.last_ts, as_of);
    }

    #[tokio::test]
    async fn test_insufficient_history() {
        let as_of = 100 * MS_PER_DAY;
        let store = seeded_store("ACME", as_of, &[100.0, 101.0]);

        let err = extract_returns(&store, "ACME", as_of, 60, 1).await.unwrap_err();

        match err {
            RiskError::InsufficientHistory {
                instrument,
                have,
                need,
            } => {
                assert_eq!(instrument, "ACME");
                assert_eq!(have, 2);
                assert_eq!(need, 61);
            }
            other => panic!("expected InsufficientHistory, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_quote_rejected() {
        // Last quote is seven days before the as-of date.
        let as_of = 100 * MS_PER_DAY;
        let store = seeded_store("ACME", as_of - 7 * MS_PER_DAY, &[100.0, 101.0, 102.0]);

        let err = extract_returns(&store, "ACME", as_of, 2, 1).await.unwrap_err();
        assert!(matches!(err, RiskError::StaleQuote { .. }));
    }

    #[tokio::test]
    async fn test_quote_exactly_one_day_old_accepted() {
        let as_of = 100 * MS_PER_DAY;
        let store = seeded_store("ACME", as_of - MS_PER_DAY, &[100.0, 101.0, 102.0]);

        let series = extract_returns(&store, "ACME", as_of, 2, 1).await.unwrap();
        assert_eq!(series.last_price, 102.0);
    }

    #[tokio::test]
    async fn test_no_future_data_in_window() {
        let as_of = 100 * MS_PER_DAY;
        let store = seeded_store("ACME", as_of + 5 * MS_PER_DAY, &[1.0; 10]);
        // Only five of the ten points fall at or before as_of.
        let err = extract_returns(&store, "ACME", as_of, 9, 1).await.unwrap_err();
        assert!(matches!(err, RiskError::InsufficientHistory { have: 5, .. }));
    }
}
