//! Static portfolio loading
//!
//! Holdings files are plain CSV with no header, one holding per line:
//!
//! ```text
//! AAPL,10
//! MSFT,5
//! TLT,-3
//! ```
//!
//! File order is preserved because downstream weighting aligns positionally
//! with the returned price data. Duplicate instruments are kept as
//! independent holdings; no aggregation is performed.

use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One portfolio line: an instrument and a signed share count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument identifier (ticker)
    pub instrument: String,

    /// Share count; negative for short positions
    pub shares: f64,
}

/// An ordered static portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    /// Build a portfolio directly from holdings
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    /// Load a portfolio from a CSV holdings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            RiskError::MalformedPortfolio(format!("{}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    /// Load a portfolio from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut holdings = Vec::new();

        for result in csv_reader.records() {
            let record =
                result.map_err(|e| RiskError::MalformedPortfolio(e.to_string()))?;
            let line = record.position().map_or(0, |p| p.line());

            // Blank lines come through as a single empty field
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            if record.len() < 2 {
                return Err(RiskError::MalformedPortfolio(format!(
                    "line {}: expected 'instrument,shares', got {:?}",
                    line,
                    record.iter().collect::<Vec<_>>().join(",")
                )));
            }

            let instrument = record[0].to_string();
            if instrument.is_empty() {
                return Err(RiskError::MalformedPortfolio(format!(
                    "line {}: empty instrument identifier",
                    line
                )));
            }

            let shares: f64 = record[1].parse().map_err(|_| {
                RiskError::MalformedPortfolio(format!(
                    "line {}: non-numeric share count {:?} for {}",
                    line, &record[1], instrument
                ))
            })?;

            holdings.push(Holding { instrument, shares });
        }

        Ok(Self { holdings })
    }

    /// Holdings in file order
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Instrument identifiers in file order
    pub fn instruments(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.instrument.clone()).collect()
    }

    /// Share counts in file order
    pub fn shares(&self) -> Vec<f64> {
        self.holdings.iter().map(|h| h.shares).collect()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_preserves_order_and_sign() {
        let data = "AAPL,10\nMSFT,5\nTLT,-3\n";
        let portfolio = Portfolio::from_reader(data.as_bytes()).unwrap();

        assert_eq!(portfolio.len(), 3);
        assert_eq!(portfolio.instruments(), vec!["AAPL", "MSFT", "TLT"]);
        assert_eq!(portfolio.shares(), vec![10.0, 5.0, -3.0]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let data = "AAPL,10\n\nMSFT,5\n";
        let portfolio = Portfolio::from_reader(data.as_bytes()).unwrap();
        assert_eq!(portfolio.len(), 2);
    }

    #[test]
    fn test_duplicates_kept_independent() {
        let data = "AAPL,10\nAAPL,2\n";
        let portfolio = Portfolio::from_reader(data.as_bytes()).unwrap();
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.shares(), vec![10.0, 2.0]);
    }

    #[test]
    fn test_missing_share_field() {
        let data = "AAPL,10\nMSFT\n";
        let err = Portfolio::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RiskError::MalformedPortfolio(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_non_numeric_shares() {
        let data = "AAPL,ten\n";
        let err = Portfolio::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RiskError::MalformedPortfolio(_)));
        assert!(err.to_string().contains("ten"));
    }

    #[test]
    fn test_fractional_shares_parse() {
        let data = "AAPL,0.5\n";
        let portfolio = Portfolio::from_reader(data.as_bytes()).unwrap();
        assert_eq!(portfolio.shares(), vec![0.5]);
    }

    #[test]
    fn test_from_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "AAPL,10\nMSFT,5\n").unwrap();

        let portfolio = Portfolio::from_path(file.path()).unwrap();
        assert_eq!(portfolio.len(), 2);
    }
}
