use crate::application::orchestrator::PipelineSettings;
use crate::domain::advisory::AdvisoryThresholds;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    Mock,
    Alpaca,
}

impl FromStr for ProviderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(ProviderMode::Mock),
            "alpaca" => Ok(ProviderMode::Alpaca),
            _ => anyhow::bail!("Invalid PROVIDER_MODE: {}. Must be 'mock' or 'alpaca'", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider_mode: ProviderMode,
    pub alpaca_api_key: String,
    pub alpaca_secret_key: String,
    pub alpaca_data_url: String,
    pub database_url: String,
    pub model_path: PathBuf,
    pub lookback_days: i64,
    pub window_size: usize,
    pub buy_threshold_pct: f64,
    pub sell_threshold_pct: f64,
    pub history_limit: usize,
    pub fetch_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("PROVIDER_MODE").unwrap_or_else(|_| "mock".to_string());
        let provider_mode = ProviderMode::from_str(&mode_str)?;

        let alpaca_api_key = env::var("ALPACA_API_KEY").unwrap_or_default();
        let alpaca_secret_key = env::var("ALPACA_SECRET_KEY").unwrap_or_default();
        let alpaca_data_url = env::var("ALPACA_DATA_URL")
            .unwrap_or_else(|_| "https://data.alpaca.markets".to_string());

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/stocksage.db".to_string());

        let model_path = PathBuf::from(
            env::var("MODEL_PATH").unwrap_or_else(|_| "models/stock_model.onnx".to_string()),
        );

        let lookback_days = env::var("LOOKBACK_DAYS")
            .unwrap_or_else(|_| "90".to_string())
            .parse::<i64>()
            .context("Failed to parse LOOKBACK_DAYS")?;

        let window_size = env::var("WINDOW_SIZE")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<usize>()
            .context("Failed to parse WINDOW_SIZE")?;

        let buy_threshold_pct = env::var("BUY_THRESHOLD_PCT")
            .unwrap_or_else(|_| "2.0".to_string())
            .parse::<f64>()
            .context("Failed to parse BUY_THRESHOLD_PCT")?;

        let sell_threshold_pct = env::var("SELL_THRESHOLD_PCT")
            .unwrap_or_else(|_| "-2.0".to_string())
            .parse::<f64>()
            .context("Failed to parse SELL_THRESHOLD_PCT")?;

        let history_limit = env::var("HISTORY_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("Failed to parse HISTORY_LIMIT")?;

        let fetch_timeout_seconds = env::var("FETCH_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("Failed to parse FETCH_TIMEOUT_SECONDS")?;

        Ok(Self {
            provider_mode,
            alpaca_api_key,
            alpaca_secret_key,
            alpaca_data_url,
            database_url,
            model_path,
            lookback_days,
            window_size,
            buy_threshold_pct,
            sell_threshold_pct,
            history_limit,
            fetch_timeout_seconds,
        })
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            lookback_days: self.lookback_days,
            window_size: self.window_size,
            thresholds: AdvisoryThresholds {
                buy_pct: self.buy_threshold_pct,
                sell_pct: self.sell_threshold_pct,
            },
            history_limit: self.history_limit,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_mode_parsing() {
        assert_eq!(ProviderMode::from_str("mock").unwrap(), ProviderMode::Mock);
        assert_eq!(
            ProviderMode::from_str("Alpaca").unwrap(),
            ProviderMode::Alpaca
        );
        assert!(ProviderMode::from_str("yahoo").is_err());
    }
}
