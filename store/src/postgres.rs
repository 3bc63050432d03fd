//! PostgreSQL-backed price store

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::reader::PriceStore;
use crate::types::{PriceBar, PricePoint};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{debug, info};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS prices (
    instrument  TEXT             NOT NULL,
    ts_utc      BIGINT           NOT NULL,
    open        DOUBLE PRECISION NOT NULL,
    high        DOUBLE PRECISION NOT NULL,
    low         DOUBLE PRECISION NOT NULL,
    close       DOUBLE PRECISION NOT NULL,
    volume      DOUBLE PRECISION NOT NULL,
    PRIMARY KEY (instrument, ts_utc)
);
";

/// Price store backed by PostgreSQL
///
/// One row per (instrument, ts_utc); re-ingesting a bar upserts it. The
/// point-in-time query walks the primary-key index backwards from the
/// `at_or_before` bound.
pub struct PostgresPriceStore {
    pool: Pool,
    config: StoreConfig,
}

impl PostgresPriceStore {
    /// Create a new store with a connection pool
    pub async fn new(config: StoreConfig) -> Result<Self> {
        info!(
            host = %config.database.host,
            database = %config.database.database,
            "Connecting price store"
        );

        let pg_config: tokio_postgres::Config = config
            .database
            .connection_string()
            .parse()
            .map_err(|e: tokio_postgres::Error| StoreError::ConnectionError(e.to_string()))?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.database.max_connections)
            .build()
            .map_err(|e| StoreError::PoolError(e.to_string()))?;

        Ok(Self { pool, config })
    }

    /// Create the prices table if it does not exist
    pub async fn init_schema(&self) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(SCHEMA_SQL)
            .await
            .map_err(|e| StoreError::SchemaError(e.to_string()))?;
        info!("Price schema ready");
        Ok(())
    }

    /// Upsert a batch of daily bars
    pub async fn upsert_bars(&self, bars: &[PriceBar]) -> Result<usize> {
        if bars.is_empty() {
            return Ok(0);
        }

        let client = self.pool.get().await?;
        let stmt = client
            .prepare(
                "INSERT INTO prices (instrument, ts_utc, open, high, low, close, volume) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 ON CONFLICT (instrument, ts_utc) DO UPDATE SET \
                 open = EXCLUDED.open, high = EXCLUDED.high, low = EXCLUDED.low, \
                 close = EXCLUDED.close, volume = EXCLUDED.volume",
            )
            .await?;

        for bar in bars {
            client
                .execute(
                    &stmt,
                    &[
                        &bar.instrument,
                        &bar.ts_utc,
                        &bar.open,
                        &bar.high,
                        &bar.low,
                        &bar.close,
                        &bar.volume,
                    ],
                )
                .await?;
        }

        debug!(count = bars.len(), "Upserted bars");
        Ok(bars.len())
    }

    /// Number of observations stored for an instrument
    pub async fn count(&self, instrument: &str) -> Result<i64> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "SELECT COUNT(*) FROM prices WHERE instrument = $1",
                &[&instrument],
            )
            .await?;
        Ok(row.get(0))
    }
}

#[async_trait]
impl PriceStore for PostgresPriceStore {
    async fn closes_at_or_before(
        &self,
        instrument: &str,
        at_or_before: i64,
        limit: usize,
    ) -> Result<Vec<PricePoint>> {
        let limit = limit.min(self.config.query.max_results) as i64;
        let client = self.pool.get().await?;

        let rows = client
            .query(
                "SELECT ts_utc, close FROM prices \
                 WHERE instrument = $1 AND ts_utc <= $2 \
                 ORDER BY ts_utc DESC LIMIT $3",
                &[&instrument, &at_or_before, &limit],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| PricePoint::new(row.get(0), row.get(1)))
            .collect())
    }
}
