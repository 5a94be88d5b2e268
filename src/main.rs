//! Silverdash API Server
//!
//! Run with: cargo run --bin silverdash
//!
//! # Configuration
//!
//! Reads `--config <path>` when given, otherwise the first config file found in
//! the default locations, otherwise defaults. `SILVERDASH_*` environment
//! variables override either; `RUST_LOG` overrides the log level.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use silverdash::api::{serve, AppState};
use silverdash::config::{Config, ConfigLoad};
use silverdash::dataset::Datasets;

#[derive(Parser)]
#[command(name = "silverdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Silver price calculator & sales dashboard API")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the input CSV files (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let discovered = match &args.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            ConfigLoad {
                config,
                source: Some(path.clone()),
                failures: Vec::new(),
            }
        }
        None => Config::load_default(),
    };
    let mut config = discovered.config.clone();
    if let Some(data_dir) = args.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    silverdash::logging::init(&config.logging);
    discovered.log();

    tracing::info!("Starting Silverdash API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("History file: {:?}", config.data.history_path());
    tracing::info!("Purchases file: {:?}", config.data.purchases_path());

    let rates = config.pricing.conversion_table()?;
    tracing::info!(
        "Conversion rates: {}",
        rates
            .iter()
            .map(|(code, rate)| format!("{}={}", code, rate))
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Load once; a missing file keeps the server up but blocks the dashboard
    let loaded = Datasets::load(&config.data);
    if let Err(e) = &loaded {
        tracing::error!("Error: {}. Dashboard routes will report data unavailable.", e);
    }

    let state = AppState::new(loaded, rates, config.pricing.clone(), config.api.clone());

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Silverdash API server stopped");
    Ok(())
}
