//! ONNX Runtime backed model.
//!
//! Expects a graph with one `[batch, 32]` f32 input and a score tensor as
//! its first output, the shape skl2onnx emits for a fitted regressor.

use std::path::Path;
use std::sync::Mutex;

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use super::{ModelError, Regressor};
use crate::encoding::{EncodedFeatures, NUM_FEATURES};

/// An ONNX regression model. The session needs `&mut` to run, so it sits
/// behind a mutex.
pub struct OnnxModel {
    session: Mutex<Session>,
}

impl OnnxModel {
    /// Loads an ONNX session from a file path.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        Ok(OnnxModel {
            session: Mutex::new(session),
        })
    }
}

impl Regressor for OnnxModel {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict(&self, row: &EncodedFeatures) -> Result<f64, ModelError> {
        let input = Value::from_array(([1_usize, NUM_FEATURES], row.to_f32_row().to_vec()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        data.first()
            .map(|&v| f64::from(v))
            .ok_or_else(|| ModelError::Inference("model returned an empty tensor".to_string()))
    }
}
