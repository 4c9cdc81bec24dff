use crate::domain::errors::PredictionError;
use crate::domain::market::TimeSeries;
use crate::domain::ml::PredictionWindow;
use anyhow::Result;
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches chronologically ascending daily closes for `symbol` over
    /// the last `lookback_days` calendar days. An empty result means the
    /// provider knows no data for the symbol; transport failures are
    /// errors.
    async fn daily_closes(&self, symbol: &str, lookback_days: i64) -> Result<TimeSeries>;
}

/// Interface for the pretrained regression model.
///
/// The model is loaded once at process start and treated as read-only;
/// each call sees one normalized window and returns one normalized
/// scalar. Implementations must be safe to share across requests.
pub trait PriceModel: Send + Sync {
    fn infer(&self, window: &PredictionWindow) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
