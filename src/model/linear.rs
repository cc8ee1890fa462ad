//! Linear regression model stored as JSON.
//!
//! Artifact format:
//! ```json
//! { "feature_names": ["school", ...], "coefficients": [0.1, ...], "intercept": -0.5 }
//! ```
//! `feature_names` records the column order the model was fitted on. A
//! model whose order differs from the encoder's still loads, but every
//! prediction fails with `SchemaMismatch`, the same point at which a
//! tabular model rejects a frame with the wrong columns.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ModelError, Regressor};
use crate::encoding::{EncodedFeatures, NUM_FEATURES};

/// On-disk representation of a fitted linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// A loaded linear model.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
    schema_error: Option<String>,
}

impl LinearModel {
    /// Builds a model from a parsed artifact.
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, ModelError> {
        if artifact.coefficients.len() != artifact.feature_names.len() {
            return Err(ModelError::Malformed(format!(
                "{} coefficients for {} feature names",
                artifact.coefficients.len(),
                artifact.feature_names.len()
            )));
        }
        if let Some(bad) = artifact.coefficients.iter().find(|c| !c.is_finite()) {
            return Err(ModelError::Malformed(format!("non-finite coefficient {}", bad)));
        }
        if !artifact.intercept.is_finite() {
            return Err(ModelError::Malformed(format!(
                "non-finite intercept {}",
                artifact.intercept
            )));
        }

        let schema_error = schema_difference(&artifact.feature_names);
        if let Some(diff) = &schema_error {
            log::warn!("Linear model columns differ from encoder: {}", diff);
        }

        Ok(LinearModel {
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            schema_error,
        })
    }

    /// Parses a model from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: LinearArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Loads a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let data = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Regressor for LinearModel {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, row: &EncodedFeatures) -> Result<f64, ModelError> {
        if let Some(diff) = &self.schema_error {
            return Err(ModelError::SchemaMismatch(diff.clone()));
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(row.as_slice())
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept + dot)
    }
}

/// Describes the first difference between `names` and the encoder's order.
fn schema_difference(names: &[String]) -> Option<String> {
    if names.len() != NUM_FEATURES {
        return Some(format!(
            "expected {} columns, model has {}",
            NUM_FEATURES,
            names.len()
        ));
    }
    EncodedFeatures::names()
        .zip(names)
        .enumerate()
        .find(|(_, (expected, actual))| expected != actual)
        .map(|(i, (expected, actual))| {
            format!("column {}: expected '{}', model has '{}'", i, expected, actual)
        })
}
