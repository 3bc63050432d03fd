//! Read interface consumed by the risk engine

use crate::error::Result;
use crate::types::PricePoint;
use async_trait::async_trait;

/// Point-in-time price reader
///
/// Implementations return the most recent closes for an instrument at or
/// before a given instant, newest first. The `at_or_before` bound is
/// inclusive and strict: no observation with `ts_utc > at_or_before` may
/// ever be returned, so a backdated query can never see future data.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Up to `limit` most recent `(ts_utc, close)` observations with
    /// `ts_utc <= at_or_before`, ordered most-recent-first.
    async fn closes_at_or_before(
        &self,
        instrument: &str,
        at_or_before: i64,
        limit: usize,
    ) -> Result<Vec<PricePoint>>;
}
