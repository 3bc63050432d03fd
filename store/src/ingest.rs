//! CSV daily-bar ingestion
//!
//! Bar files carry one instrument each, with a header row:
//!
//! ```text
//! ts_utc,open,high,low,close,volume
//! 1686009600000,177.9,180.1,177.5,179.2,1100000
//! ```
//!
//! Timestamps are milliseconds since epoch UTC. Rows are upserted, so
//! re-ingesting a corrected file is safe.

use crate::error::{Result, StoreError};
use crate::postgres::PostgresPriceStore;
use crate::types::PriceBar;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct BarRecord {
    ts_utc: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Parse daily bars for `instrument` from CSV
///
/// Rejects non-positive closes and non-increasing timestamps rather than
/// letting bad bars poison downstream risk numbers.
pub fn read_bars_csv<R: Read>(instrument: &str, reader: R) -> Result<Vec<PriceBar>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    let mut last_ts: Option<i64> = None;

    for (i, record) in csv_reader.deserialize::<BarRecord>().enumerate() {
        let record = record
            .map_err(|e| StoreError::MalformedBar(format!("{}: row {}: {}", instrument, i + 1, e)))?;

        if record.close <= 0.0 || !record.close.is_finite() {
            return Err(StoreError::MalformedBar(format!(
                "{}: row {}: non-positive close {}",
                instrument,
                i + 1,
                record.close
            )));
        }

        if let Some(prev) = last_ts {
            if record.ts_utc <= prev {
                return Err(StoreError::MalformedBar(format!(
                    "{}: row {}: timestamp {} not after {}",
                    instrument,
                    i + 1,
                    record.ts_utc,
                    prev
                )));
            }
        }
        last_ts = Some(record.ts_utc);

        bars.push(PriceBar {
            instrument: instrument.to_string(),
            ts_utc: record.ts_utc,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }

    Ok(bars)
}

/// Ingest a single bar file, deriving the instrument from the file stem
pub async fn ingest_file(store: &PostgresPriceStore, path: &Path) -> Result<usize> {
    let instrument = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_uppercase)
        .ok_or_else(|| {
            StoreError::InvalidParameters(format!("cannot derive instrument from {:?}", path))
        })?;

    let file = std::fs::File::open(path)
        .map_err(|e| StoreError::MalformedBar(format!("{:?}: {}", path, e)))?;

    let bars = read_bars_csv(&instrument, file)?;
    let count = store.upsert_bars(&bars).await?;
    info!(instrument = %instrument, count, "Ingested bars");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "\
ts_utc,open,high,low,close,volume
1000,10.0,11.0,9.5,10.5,100
87401000,10.5,10.9,10.1,10.2,120
";

    #[test]
    fn test_read_bars() {
        let bars = read_bars_csv("ACME", GOOD.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].instrument, "ACME");
        assert_eq!(bars[0].ts_utc, 1000);
        assert_eq!(bars[1].close, 10.2);
    }

    #[test]
    fn test_rejects_non_positive_close() {
        let data = "ts_utc,open,high,low,close,volume\n1000,1.0,1.0,1.0,0.0,10\n";
        let err = read_bars_csv("ACME", data.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedBar(_)));
    }

    #[test]
    fn test_rejects_out_of_order_timestamps() {
        let data = "\
ts_utc,open,high,low,close,volume
2000,1.0,1.0,1.0,1.0,10
1000,1.0,1.0,1.0,1.0,10
";
        let err = read_bars_csv("ACME", data.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedBar(_)));
    }

    #[test]
    fn test_rejects_non_numeric_field() {
        let data = "ts_utc,open,high,low,close,volume\n1000,1.0,1.0,1.0,abc,10\n";
        let err = read_bars_csv("ACME", data.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedBar(_)));
    }
}
