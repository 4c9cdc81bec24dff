use thiserror::Error;

/// Errors raised by the prediction pipeline.
///
/// Every variant is terminal for the request that produced it except
/// `Persistence`, which the orchestrator reports separately when the
/// prediction itself already succeeded.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Not logged in")]
    Unauthenticated,

    #[error("No stock data for {symbol}")]
    NoData { symbol: String },

    #[error("Market data fetch failed: {reason}")]
    MarketData { reason: String },

    #[error("Not enough history: have {have} closes, need {need}")]
    InsufficientHistory { have: usize, need: usize },

    #[error("Series has no price variation (min == max)")]
    DegenerateSeries,

    #[error("Model inference failed: {reason}")]
    ModelInference { reason: String },

    #[error("Current price is zero, cannot compute percent change")]
    ZeroCurrentPrice,

    #[error("Failed to persist prediction record: {reason}")]
    Persistence { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_history_formatting() {
        let err = PredictionError::InsufficientHistory { have: 42, need: 60 };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("60"));
    }

    #[test]
    fn test_no_data_formatting() {
        let err = PredictionError::NoData {
            symbol: "TCS.NS".to_string(),
        };
        assert!(err.to_string().contains("TCS.NS"));
    }
}
