use crate::domain::errors::PredictionError;

/// Sequence length the pretrained model was trained on.
pub const DEFAULT_WINDOW_SIZE: usize = 60;

/// The trailing slice of a normalized series, shaped for the model as
/// (steps, 1 feature). Insufficient history is rejected here so every
/// caller gets the same explicit error instead of a reshape failure
/// further down.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionWindow {
    values: Vec<f64>,
}

impl PredictionWindow {
    /// Takes the last `size` values in original order. No smoothing, no
    /// gap-filling, no padding.
    pub fn from_normalized(normalized: &[f64], size: usize) -> Result<Self, PredictionError> {
        if normalized.len() < size {
            return Err(PredictionError::InsufficientHistory {
                have: normalized.len(),
                need: size,
            });
        }
        Ok(Self {
            values: normalized[normalized.len() - size..].to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Flat f32 copy for the (1, steps, 1) inference tensor.
    pub fn to_input_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_takes_trailing_slice_in_order() {
        let series: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
        let window = PredictionWindow::from_normalized(&series, 60).unwrap();
        assert_eq!(window.len(), 60);
        assert_eq!(window.values()[0], 0.40);
        assert_eq!(*window.values().last().unwrap(), 0.99);
    }

    #[test]
    fn test_exact_length_is_accepted() {
        let series = vec![0.5; 60];
        assert!(PredictionWindow::from_normalized(&series, 60).is_ok());
    }

    #[test]
    fn test_short_series_is_rejected() {
        let series = vec![0.5; 59];
        let err = PredictionWindow::from_normalized(&series, 60).unwrap_err();
        match err {
            PredictionError::InsufficientHistory { have, need } => {
                assert_eq!(have, 59);
                assert_eq!(need, 60);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
