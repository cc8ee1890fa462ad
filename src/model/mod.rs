//! Pre-trained regression models.
//!
//! A model is an opaque artifact loaded once at startup. It only needs to
//! turn one encoded feature row into a raw score. The JSON linear model is
//! always available; ONNX models (for example a scikit-learn pipeline
//! exported with skl2onnx) need the `onnx` feature.

mod linear;
#[cfg(feature = "onnx")]
mod onnx;

use std::path::{Path, PathBuf};

pub use linear::{LinearArtifact, LinearModel};
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;

use crate::encoding::EncodedFeatures;

/// Errors raised while loading or running a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// A regression model that scores one feature row.
///
/// Implementations must be side-effect free so a single instance can be
/// shared by concurrent callers.
pub trait Regressor: Send + Sync {
    /// Short human-readable identifier for logs.
    fn name(&self) -> &str;

    /// Returns the raw, unrounded score for a row.
    fn predict(&self, row: &EncodedFeatures) -> Result<f64, ModelError>;
}

/// Loads a model artifact, choosing the loader by file extension.
pub fn load_model(path: &Path) -> Result<Box<dyn Regressor>, ModelError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let model: Box<dyn Regressor> = match ext {
        "json" => Box::new(LinearModel::load(path)?),
        #[cfg(feature = "onnx")]
        "onnx" => Box::new(OnnxModel::load(path)?),
        #[cfg(not(feature = "onnx"))]
        "onnx" => {
            return Err(ModelError::UnsupportedFormat(
                "ONNX models need the 'onnx' feature".to_string(),
            ))
        }
        other => {
            return Err(ModelError::UnsupportedFormat(format!(
                "'{}' ({})",
                other,
                path.display()
            )))
        }
    };
    log::info!("Loaded {} model from {}", model.name(), path.display());
    Ok(model)
}
