use crate::domain::errors::PredictionError;
use crate::domain::ml::PredictionWindow;
use crate::domain::ports::PriceModel;
use anyhow::{Context, Result};
use ort::session::Session;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

/// Pretrained regression model loaded from a versioned ONNX artifact.
///
/// Loaded once at process start; a missing or unreadable artifact is a
/// startup error, not a silent neutral fallback. The session sits
/// behind a mutex because `run` needs exclusive access to its inference
/// buffers; the model weights themselves are read-only.
pub struct OnnxPriceModel {
    session: Mutex<Session>,
    model_path: PathBuf,
}

impl OnnxPriceModel {
    pub fn load(model_path: PathBuf) -> Result<Self> {
        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {:?}", model_path))?;

        info!("Loaded ONNX model from {:?}", model_path);
        Ok(Self {
            session: Mutex::new(session),
            model_path,
        })
    }
}

impl PriceModel for OnnxPriceModel {
    /// Runs the model on a (1, steps, 1) tensor and takes the single
    /// scalar output, still in normalized units.
    fn infer(&self, window: &PredictionWindow) -> Result<f64, PredictionError> {
        let inference = |reason: String| PredictionError::ModelInference { reason };

        let input = ndarray::Array3::from_shape_vec((1, window.len(), 1), window.to_input_f32())
            .map_err(|e| inference(format!("window reshape failed: {e}")))?;

        let input_value = ort::value::Value::from_array(input)
            .map_err(|e| inference(format!("input tensor creation failed: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| inference(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| inference(e.to_string()))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or_else(|| inference("model produced no outputs".to_string()))?;

        let (_, data) = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| inference(e.to_string()))?;

        let scalar = data
            .iter()
            .next()
            .ok_or_else(|| inference("model output tensor is empty".to_string()))?;

        Ok(*scalar as f64)
    }

    fn name(&self) -> &str {
        self.model_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("onnx-model")
    }
}
