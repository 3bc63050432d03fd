use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one day
pub const MS_PER_DAY: i64 = 86_400_000;

/// A single daily OHLCV bar for an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Instrument identifier (ticker)
    pub instrument: String,

    /// Bar timestamp, milliseconds since epoch UTC
    pub ts_utc: i64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Bar timestamp as a chrono datetime
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.ts_utc)
    }
}

/// A (timestamp, close) observation returned by point-in-time queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation timestamp, milliseconds since epoch UTC
    pub ts_utc: i64,

    /// Close price (positive)
    pub close: f64,
}

impl PricePoint {
    pub fn new(ts_utc: i64, close: f64) -> Self {
        Self { ts_utc, close }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_timestamp() {
        let bar = PriceBar {
            instrument: "AAPL".to_string(),
            ts_utc: 1_686_096_000_000,
            open: 178.0,
            high: 180.5,
            low: 177.2,
            close: 179.8,
            volume: 1_200_000.0,
        };

        let ts = bar.timestamp().unwrap();
        assert_eq!(ts.timestamp_millis(), bar.ts_utc);
    }

    #[test]
    fn test_price_point_new() {
        let p = PricePoint::new(1_000, 42.5);
        assert_eq!(p.ts_utc, 1_000);
        assert_eq!(p.close, 42.5);
    }
}
