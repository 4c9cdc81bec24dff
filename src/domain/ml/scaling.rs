use crate::domain::errors::PredictionError;

/// Min-max scaling parameters fitted over one price series.
///
/// Fitted fresh for every prediction request from the entire fetched
/// series, used to normalize the model window and to invert the model
/// output, then dropped. Never shared across requests or symbols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingParams {
    min: f64,
    max: f64,
}

impl ScalingParams {
    /// Computes min/max over the full series.
    ///
    /// A series with no variation (all closes equal, or empty) cannot be
    /// scaled into [0, 1] and fails instead of dividing by zero.
    pub fn fit(closes: &[f64]) -> Result<Self, PredictionError> {
        let mut iter = closes.iter().copied();
        let first = iter.next().ok_or(PredictionError::DegenerateSeries)?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if max == min {
            return Err(PredictionError::DegenerateSeries);
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps each close into [0, 1] relative to the fitted range.
    pub fn normalize(&self, closes: &[f64]) -> Vec<f64> {
        let span = self.max - self.min;
        closes.iter().map(|v| (v - self.min) / span).collect()
    }

    /// Maps a normalized scalar back to price units.
    pub fn invert(&self, scaled: f64) -> f64 {
        scaled * (self.max - self.min) + self.min
    }
}
