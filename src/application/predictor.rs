use crate::domain::errors::PredictionError;
use crate::domain::ml::{PredictionWindow, ScalingParams};
use crate::domain::ports::PriceModel;
use std::sync::Arc;
use tracing::debug;

/// Runs the pretrained model on one window and maps the output back to
/// price units.
///
/// The model is injected as a read-only dependency so tests can swap in
/// a deterministic stub. The scaling parameters must be the same ones
/// that normalized the window; they are request-scoped and never reused
/// across symbols or requests.
pub struct PricePredictor {
    model: Arc<dyn PriceModel>,
}

impl PricePredictor {
    pub fn new(model: Arc<dyn PriceModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Single synchronous inference call; a failure aborts the request,
    /// no retry.
    pub fn predict(
        &self,
        window: &PredictionWindow,
        params: &ScalingParams,
    ) -> Result<f64, PredictionError> {
        let scaled = self.model.infer(window)?;
        let price = params.invert(scaled);
        debug!(
            model = self.model.name(),
            scaled, price, "Model inference complete"
        );
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::FixedOutputModel;

    #[test]
    fn test_predict_inverts_with_request_params() {
        // Model says "0.5 of the fitted range"
        let predictor = PricePredictor::new(Arc::new(FixedOutputModel::new(0.5)));
        let params = ScalingParams::fit(&[100.0, 200.0]).unwrap();
        let window = PredictionWindow::from_normalized(&vec![0.5; 60], 60).unwrap();

        let price = predictor.predict(&window, &params).unwrap();
        assert_eq!(price, 150.0);
    }

    #[test]
    fn test_model_failure_propagates() {
        let predictor = PricePredictor::new(Arc::new(FixedOutputModel::failing("broken graph")));
        let params = ScalingParams::fit(&[100.0, 200.0]).unwrap();
        let window = PredictionWindow::from_normalized(&vec![0.5; 60], 60).unwrap();

        let err = predictor.predict(&window, &params).unwrap_err();
        assert!(matches!(err, PredictionError::ModelInference { .. }));
    }
}
