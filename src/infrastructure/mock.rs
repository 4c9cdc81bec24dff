use crate::domain::errors::PredictionError;
use crate::domain::market::{ClosingPrice, TimeSeries};
use crate::domain::ml::PredictionWindow;
use crate::domain::ports::{MarketDataProvider, PriceModel};
use crate::domain::repositories::{PredictionHistoryRepository, PredictionRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use std::time::Duration;
use tokio::time::sleep;

/// Offline market-data provider used by mock mode and the test suite.
/// Serves a preset sequence of closes on consecutive calendar days.
pub struct MockMarketDataProvider {
    closes: Vec<f64>,
    start_date: NaiveDate,
    delay: Option<Duration>,
    fail_reason: Option<String>,
}

impl MockMarketDataProvider {
    pub fn with_closes(closes: Vec<f64>) -> Self {
        Self {
            closes,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            delay: None,
            fail_reason: None,
        }
    }

    /// Provider that knows no data for any symbol.
    pub fn empty() -> Self {
        Self::with_closes(Vec::new())
    }

    /// Provider that fails at the transport level.
    pub fn failing(reason: &str) -> Self {
        let mut provider = Self::empty();
        provider.fail_reason = Some(reason.to_string());
        provider
    }

    /// Delays every response, for exercising the fetch timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Linear ramp: `len` closes starting at `start`, one unit per day.
    pub fn ascending_ramp(start: f64, len: usize) -> Self {
        Self::with_closes((0..len).map(|i| start + i as f64).collect())
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn daily_closes(&self, symbol: &str, _lookback_days: i64) -> Result<TimeSeries> {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        if let Some(reason) = &self.fail_reason {
            anyhow::bail!("mock transport failure: {}", reason);
        }

        let points = self
            .closes
            .iter()
            .enumerate()
            .map(|(i, close)| ClosingPrice {
                date: self.start_date + ChronoDuration::days(i as i64),
                close: *close,
            })
            .collect();

        Ok(TimeSeries::new(symbol, points))
    }
}

/// Stub model that always returns the same normalized scalar, or always
/// fails.
pub struct FixedOutputModel {
    output: f64,
    fail_reason: Option<String>,
}

impl FixedOutputModel {
    pub fn new(output: f64) -> Self {
        Self {
            output,
            fail_reason: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            output: 0.0,
            fail_reason: Some(reason.to_string()),
        }
    }
}

impl PriceModel for FixedOutputModel {
    fn infer(&self, _window: &PredictionWindow) -> Result<f64, PredictionError> {
        match &self.fail_reason {
            Some(reason) => Err(PredictionError::ModelInference {
                reason: reason.clone(),
            }),
            None => Ok(self.output),
        }
    }

    fn name(&self) -> &str {
        "fixed-output-stub"
    }
}

/// Stub model that extrapolates the window's trend one step forward:
/// last value plus a fixed drift. On a rising series the prediction
/// lands above the current price, on a falling one below.
pub struct TrendContinuationModel {
    drift: f64,
}

impl TrendContinuationModel {
    pub fn new(drift: f64) -> Self {
        Self { drift }
    }
}

impl Default for TrendContinuationModel {
    fn default() -> Self {
        Self::new(0.02)
    }
}

impl PriceModel for TrendContinuationModel {
    fn infer(&self, window: &PredictionWindow) -> Result<f64, PredictionError> {
        let last = window
            .values()
            .last()
            .copied()
            .ok_or_else(|| PredictionError::ModelInference {
                reason: "empty window".to_string(),
            })?;
        Ok(last + self.drift)
    }

    fn name(&self) -> &str {
        "trend-continuation-stub"
    }
}

/// History repository whose writes always fail, for exercising the
/// persist-failure policy.
pub struct FailingHistoryRepository;

#[async_trait]
impl PredictionHistoryRepository for FailingHistoryRepository {
    async fn record(
        &self,
        _username: &str,
        _symbol: &str,
        _predicted_price: f64,
    ) -> Result<(), PredictionError> {
        Err(PredictionError::Persistence {
            reason: "disk full".to_string(),
        })
    }

    async fn recent_for(
        &self,
        _username: &str,
        _limit: usize,
    ) -> Result<Vec<PredictionRecord>, PredictionError> {
        Err(PredictionError::Persistence {
            reason: "disk full".to_string(),
        })
    }
}
