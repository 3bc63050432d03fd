//! mcvar command-line surface
//!
//! Thin glue over the store, risk and explain crates:
//!
//! - `mcvar ingest bars/aapl.csv bars/msft.csv` — load daily bars
//! - `mcvar var --portfolio portfolio.csv --as-of 2023-06-07` — VaR/ES
//! - `mcvar explain --portfolio portfolio.csv --as-of 2023-06-07` — narrative

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use mcvar_explain::{ExplainConfig, Explainer};
use mcvar_risk::{compute_var_es, Portfolio, RiskConfig};
use mcvar_store::{ingest::ingest_file, PostgresPriceStore, PriceStore, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "mcvar", about = "Historical Monte Carlo VaR/ES toolkit")]
struct Args {
    /// Price store configuration (YAML); defaults to a local database
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest daily-bar CSV files (instrument taken from the file stem)
    Ingest {
        /// Bar files to load
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },

    /// Compute portfolio VaR and Expected Shortfall
    Var {
        /// Holdings file (`instrument,shares` per line)
        #[clap(short, long)]
        portfolio: PathBuf,

        /// Valuation date, YYYY-MM-DD (midnight UTC)
        #[clap(long)]
        as_of: String,

        /// Trailing trading days of history
        #[clap(long, default_value_t = 60)]
        lookback: usize,

        /// Number of Monte Carlo scenarios
        #[clap(long, default_value_t = 1000)]
        simulations: usize,

        /// Confidence level in (0, 1)
        #[clap(long, default_value_t = 0.95)]
        alpha: f64,

        /// Monte Carlo seed
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },

    /// Explain the day-over-day VaR change in three bullets
    Explain {
        /// Holdings file (`instrument,shares` per line)
        #[clap(short, long)]
        portfolio: PathBuf,

        /// Valuation date, YYYY-MM-DD (midnight UTC)
        #[clap(long)]
        as_of: String,
    },
}

fn parse_as_of(date: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid as-of date {date:?}, expected YYYY-MM-DD"))?;
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| anyhow!("invalid as-of date {date:?}"))
}

async fn open_store(config: &Option<PathBuf>) -> Result<Arc<PostgresPriceStore>> {
    let store_config = match config {
        Some(path) => StoreConfig::from_yaml_file(
            path.to_str()
                .ok_or_else(|| anyhow!("non-UTF8 config path {path:?}"))?,
        )?,
        None => StoreConfig::default(),
    };

    let store = PostgresPriceStore::new(store_config).await?;
    store.init_schema().await?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Ingest { files } => {
            let store = open_store(&args.config).await?;
            let mut total = 0;
            for file in &files {
                total += ingest_file(&store, file).await?;
            }
            info!(files = files.len(), bars = total, "Ingestion complete");
        }

        Command::Var {
            portfolio,
            as_of,
            lookback,
            simulations,
            alpha,
            seed,
        } => {
            let store: Arc<dyn PriceStore> = open_store(&args.config).await?;
            let risk_config = RiskConfig {
                lookback_days: lookback,
                simulations,
                confidence: alpha,
                seed,
                ..Default::default()
            };

            let as_of = parse_as_of(&as_of)?;
            let (var, es) = compute_var_es(store, &portfolio, as_of, &risk_config).await?;
            println!("VaR: {var:.2}  ES: {es:.2}");
        }

        Command::Explain { portfolio, as_of } => {
            let store: Arc<dyn PriceStore> = open_store(&args.config).await?;
            let risk_config = RiskConfig::default();

            let as_of_dt = parse_as_of(&as_of)?;
            let yesterday = as_of_dt - chrono::Duration::days(1);

            let (var_today, _) =
                compute_var_es(store.clone(), &portfolio, as_of_dt, &risk_config).await?;
            let (var_yesterday, _) =
                compute_var_es(store, &portfolio, yesterday, &risk_config).await?;

            let drivers = Portfolio::from_path(&portfolio)?.instruments();

            let api_key = std::env::var("OPENROUTER_API_KEY")
                .context("OPENROUTER_API_KEY must be set for explain")?;
            let explainer = Explainer::new(ExplainConfig {
                api_key,
                base_url: "https://openrouter.ai/api/v1".to_string(),
                model: "deepseek/deepseek-r1-0528:free".to_string(),
                temperature: 0.7,
                max_tokens: 2000,
            })?;

            let explanation = explainer
                .explain_var(var_today, var_yesterday, &drivers, Some(&as_of))
                .await?;
            println!("{explanation}");
        }
    }

    Ok(())
}
