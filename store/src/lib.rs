//! Price history store for the mcvar risk toolkit
//!
//! This crate persists daily close prices per instrument and answers the one
//! query the risk engine needs: "the most recent N closes at or before a
//! point in time". Queries are point-in-time safe — an `at_or_before` bound
//! can never leak observations from the future into a risk calculation.
//!
//! # Components
//!
//! - [`PriceStore`]: the read interface consumed by the risk engine
//! - [`PostgresPriceStore`]: production store backed by PostgreSQL
//! - [`MemoryPriceStore`]: in-process store for tests and demos
//! - [`ingest`]: CSV daily-bar ingestion
//!
//! # Example
//!
//! ```no_run
//! use mcvar_store::{PostgresPriceStore, PriceStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresPriceStore::new(StoreConfig::default()).await?;
//!     store.init_schema().await?;
//!
//!     let closes = store.closes_at_or_before("AAPL", 1_686_096_000_000, 61).await?;
//!     println!("{} closes on record", closes.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod memory;
pub mod postgres;
pub mod reader;
pub mod types;

pub use config::{DatabaseConfig, QueryConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use memory::MemoryPriceStore;
pub use postgres::PostgresPriceStore;
pub use reader::PriceStore;
pub use types::{PriceBar, PricePoint, MS_PER_DAY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing subscriber (for examples and tests)
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mcvar_store=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
    }
}
