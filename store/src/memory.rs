//! In-process price store for tests and demos

use crate::error::Result;
use crate::reader::PriceStore;
use crate::types::{PriceBar, PricePoint};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// In-memory price store
///
/// Keeps one ordered series per instrument. Inserting a bar with an existing
/// timestamp overwrites it, matching the upsert semantics of the Postgres
/// store.
#[derive(Debug, Default)]
pub struct MemoryPriceStore {
    series: RwLock<HashMap<String, BTreeMap<i64, f64>>>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single close observation
    pub fn insert_close(&self, instrument: &str, ts_utc: i64, close: f64) {
        let mut series = self.series.write().unwrap();
        series
            .entry(instrument.to_string())
            .or_default()
            .insert(ts_utc, close);
    }

    /// Insert a full bar (only the close participates in queries)
    pub fn insert_bar(&self, bar: &PriceBar) {
        self.insert_close(&bar.instrument, bar.ts_utc, bar.close);
    }

    /// Insert a daily close series ending at `last_ts`, one point per day
    pub fn insert_daily_series(&self, instrument: &str, last_ts: i64, closes: &[f64]) {
        use crate::types::MS_PER_DAY;
        for (i, close) in closes.iter().enumerate() {
            let offset = (closes.len() - 1 - i) as i64;
            self.insert_close(instrument, last_ts - offset * MS_PER_DAY, *close);
        }
    }

    /// Number of observations stored for an instrument
    pub fn len(&self, instrument: &str) -> usize {
        self.series
            .read()
            .unwrap()
            .get(instrument)
            .map_or(0, |s| s.len())
    }

    pub fn is_empty(&self, instrument: &str) -> bool {
        self.len(instrument) == 0
    }
}

#[async_trait]
impl PriceStore for MemoryPriceStore {
    async fn closes_at_or_before(
        &self,
        instrument: &str,
        at_or_before: i64,
        limit: usize,
    ) -> Result<Vec<PricePoint>> {
        let series = self.series.read().unwrap();
        let points = match series.get(instrument) {
            Some(s) => s
                .range(..=at_or_before)
                .rev()
                .take(limit)
                .map(|(&ts, &close)| PricePoint::new(ts, close))
                .collect(),
            None => Vec::new(),
        };
        Ok(points)
    }
}
