//! Stocksage - headless stock prediction CLI
//!
//! Fetches recent daily closes for a symbol, runs the pretrained
//! regression model over the trailing window and prints the forward
//! price estimate, the directional signal and the BUY/SELL/HOLD advice,
//! recording the prediction against the given user.
//!
//! # Usage
//! ```sh
//! PROVIDER_MODE=alpaca cargo run -- AAPL --user alice
//! ```

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use stocksage::application::orchestrator::PredictionOrchestrator;
use stocksage::application::predictor::PricePredictor;
use stocksage::config::{Config, ProviderMode};
use stocksage::domain::ports::{MarketDataProvider, PriceModel};
use stocksage::infrastructure::mock::{MockMarketDataProvider, TrendContinuationModel};
use stocksage::infrastructure::persistence::{Database, SqlitePredictionHistoryRepository};
use stocksage::infrastructure::{AlpacaMarketDataProvider, OnnxPriceModel};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "stocksage", about = "Stock price prediction and advice")]
struct Cli {
    /// Ticker symbol to predict (e.g. AAPL)
    symbol: String,

    /// Identity to record the prediction under
    #[arg(long, default_value = "console")]
    user: String,

    /// Also print the user's recent prediction history
    #[arg(long)]
    history: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!(
        "Stocksage {} starting (mode: {:?})",
        env!("CARGO_PKG_VERSION"),
        config.provider_mode
    );

    let database = Database::new(&config.database_url).await?;
    let history = Arc::new(SqlitePredictionHistoryRepository::new(database.pool.clone()));

    let (market_data, model): (Arc<dyn MarketDataProvider>, Arc<dyn PriceModel>) =
        match config.provider_mode {
            ProviderMode::Alpaca => (
                Arc::new(AlpacaMarketDataProvider::new(
                    config.alpaca_api_key.clone(),
                    config.alpaca_secret_key.clone(),
                    config.alpaca_data_url.clone(),
                    std::time::Duration::from_secs(config.fetch_timeout_seconds),
                )),
                Arc::new(OnnxPriceModel::load(config.model_path.clone())?),
            ),
            ProviderMode::Mock => (
                // Offline mode: synthetic ramp + trend-following stub
                Arc::new(MockMarketDataProvider::ascending_ramp(
                    100.0,
                    config.lookback_days as usize,
                )),
                Arc::new(TrendContinuationModel::default()),
            ),
        };

    let orchestrator = PredictionOrchestrator::new(
        market_data,
        PricePredictor::new(model),
        history,
        config.pipeline_settings(),
    );

    let symbol = cli.symbol.trim().to_uppercase();
    let result = orchestrator
        .get_prediction(Some(&cli.user), &symbol)
        .await?;

    println!("\nPrediction for {}", result.symbol);
    println!("  Current price:   {:.2}", result.current_price);
    println!("  Predicted price: {:.2}", result.predicted_price);
    println!(
        "  Change:          {:.2} ({:.2}%)",
        result.change, result.percent_change
    );
    println!("  Signal:          {}", result.signal);
    println!("  Advice:          {}", result.advice);

    if cli.history {
        let records = orchestrator.get_recent_history(Some(&cli.user)).await?;
        println!("\nRecent predictions for {}:", cli.user);
        for record in records {
            println!(
                "  {}  {:<8} {:.2}",
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                record.symbol,
                record.predicted_price
            );
        }
    }

    Ok(())
}
