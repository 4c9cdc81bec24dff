use crate::application::predictor::PricePredictor;
use crate::domain::advisory::{self, Advice, AdvisoryThresholds, Signal};
use crate::domain::errors::PredictionError;
use crate::domain::market::TimeSeries;
use crate::domain::ml::{PredictionWindow, ScalingParams, DEFAULT_WINDOW_SIZE};
use crate::domain::ports::MarketDataProvider;
use crate::domain::repositories::{PredictionHistoryRepository, PredictionRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Everything derived from one prediction request. Immutable once
/// computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub symbol: String,
    pub predicted_price: f64,
    pub current_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub signal: Signal,
    pub advice: Advice,
}

/// Request-independent pipeline settings, normally built from `Config`.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Calendar days of history to fetch (3 months by default).
    pub lookback_days: i64,
    /// Model sequence length.
    pub window_size: usize,
    pub thresholds: AdvisoryThresholds,
    /// Entries returned by `get_recent_history`.
    pub history_limit: usize,
    /// Bound on the market-data fetch; a timeout fails the request.
    pub fetch_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            window_size: DEFAULT_WINDOW_SIZE,
            thresholds: AdvisoryThresholds::default(),
            history_limit: 5,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Composes the pipeline per request: fetch -> fit/normalize -> window
/// -> predict -> advise -> persist -> respond.
///
/// Every request fits its own `ScalingParams` from its own fetched
/// series; the only shared mutable state is the history repository.
pub struct PredictionOrchestrator {
    market_data: Arc<dyn MarketDataProvider>,
    predictor: PricePredictor,
    history: Arc<dyn PredictionHistoryRepository>,
    settings: PipelineSettings,
}

impl PredictionOrchestrator {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        predictor: PricePredictor,
        history: Arc<dyn PredictionHistoryRepository>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            market_data,
            predictor,
            history,
            settings,
        }
    }

    /// One prediction request, terminal on first failure.
    ///
    /// A history-write failure after a successful prediction is the one
    /// non-terminal case: the result is still returned and the failure
    /// is reported through the log, never through the payload.
    pub async fn get_prediction(
        &self,
        username: Option<&str>,
        symbol: &str,
    ) -> Result<PredictionResult, PredictionError> {
        let username = Self::require_user(username)?;

        let series = self.fetch_series(symbol).await?;
        let current_price = series
            .last_close()
            .ok_or_else(|| PredictionError::NoData {
                symbol: symbol.to_string(),
            })?;

        let closes = series.closes();
        let params = ScalingParams::fit(&closes)?;
        let normalized = params.normalize(&closes);
        let window = PredictionWindow::from_normalized(&normalized, self.settings.window_size)?;

        let predicted_price = self.predictor.predict(&window, &params)?;
        let advisory = advisory::advise(predicted_price, current_price, &self.settings.thresholds)?;

        info!(
            user = username,
            symbol,
            predicted_price,
            current_price,
            signal = %advisory.signal,
            advice = %advisory.advice,
            "Prediction complete"
        );

        // Policy: a failed history write must not mask a successful
        // prediction. Log it and respond anyway.
        if let Err(e) = self.history.record(username, symbol, predicted_price).await {
            warn!(user = username, symbol, error = %e, "History write failed after successful prediction");
        }

        Ok(PredictionResult {
            symbol: symbol.to_string(),
            predicted_price,
            current_price,
            change: advisory.change,
            percent_change: advisory.percent,
            signal: advisory.signal,
            advice: advisory.advice,
        })
    }

    /// The caller's most recent predictions, bounded by the configured
    /// limit, most-recent first.
    pub async fn get_recent_history(
        &self,
        username: Option<&str>,
    ) -> Result<Vec<PredictionRecord>, PredictionError> {
        let username = Self::require_user(username)?;
        self.history
            .recent_for(username, self.settings.history_limit)
            .await
    }

    /// Raw dates/closes over the lookback period, for charting.
    pub async fn get_price_history(
        &self,
        username: Option<&str>,
        symbol: &str,
    ) -> Result<TimeSeries, PredictionError> {
        Self::require_user(username)?;
        self.fetch_series(symbol).await
    }

    fn require_user(username: Option<&str>) -> Result<&str, PredictionError> {
        match username {
            Some(u) if !u.trim().is_empty() => Ok(u),
            _ => Err(PredictionError::Unauthenticated),
        }
    }

    async fn fetch_series(&self, symbol: &str) -> Result<TimeSeries, PredictionError> {
        debug!(symbol, lookback_days = self.settings.lookback_days, "Fetching daily closes");

        let fetch = self
            .market_data
            .daily_closes(symbol, self.settings.lookback_days);
        let series = match timeout(self.settings.fetch_timeout, fetch).await {
            Ok(Ok(series)) => series,
            Ok(Err(e)) => {
                return Err(PredictionError::MarketData {
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                return Err(PredictionError::MarketData {
                    reason: format!(
                        "timed out after {}s",
                        self.settings.fetch_timeout.as_secs()
                    ),
                });
            }
        };

        if series.is_empty() {
            return Err(PredictionError::NoData {
                symbol: symbol.to_string(),
            });
        }
        if !series.is_chronological() {
            warn!(symbol, "Provider returned out-of-order dates");
        }

        Ok(series)
    }
}
