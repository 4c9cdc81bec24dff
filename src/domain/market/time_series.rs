use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation: the date and the session's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingPrice {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronologically ascending daily closes for one symbol, as returned by
/// the market-data provider for the configured lookback period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    pub symbol: String,
    pub points: Vec<ClosingPrice>,
}

impl TimeSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<ClosingPrice>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The most recent observed close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates strictly increasing. Gaps are allowed (weekends, holidays,
    /// provider-dependent), duplicates and reordering are not.
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|w| w[0].date < w[1].date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(y: i32, m: u32, d: u32, close: f64) -> ClosingPrice {
        ClosingPrice {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close,
        }
    }

    #[test]
    fn test_last_close() {
        let series = TimeSeries::new(
            "AAPL",
            vec![point(2025, 1, 2, 100.0), point(2025, 1, 3, 101.5)],
        );
        assert_eq!(series.last_close(), Some(101.5));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_chronological_allows_gaps_but_not_duplicates() {
        // Friday then Monday: gap over the weekend is fine
        let gapped = TimeSeries::new(
            "AAPL",
            vec![point(2025, 1, 3, 100.0), point(2025, 1, 6, 101.0)],
        );
        assert!(gapped.is_chronological());

        let duplicated = TimeSeries::new(
            "AAPL",
            vec![point(2025, 1, 3, 100.0), point(2025, 1, 3, 101.0)],
        );
        assert!(!duplicated.is_chronological());
    }

    #[test]
    fn test_empty_series() {
        let series = TimeSeries::new("AAPL", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.last_close(), None);
        assert!(series.is_chronological());
    }
}
