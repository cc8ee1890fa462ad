//! Final grade prediction.
//!
//! `Predictor` owns the loaded model and turns a raw student record into a
//! G3 grade: encode, score, round half to even, clip to [0, 20].

use std::fmt;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::encoding::{encode, EncodeError, EncodedFeatures};
use crate::model::{load_model, ModelError, Regressor};
use crate::student::RawInput;

/// Lowest possible grade.
pub const MIN_GRADE: u8 = 0;

/// Highest possible grade.
pub const MAX_GRADE: u8 = 20;

/// Errors that can occur during a prediction.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("model returned a NaN score")]
    NanScore,
}

/// A predicted final grade in `MIN_GRADE..=MAX_GRADE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rounds a raw score to the nearest integer and clips it to the grade range.
///
/// Exact halves round to the even neighbour (2.5 -> 2, 3.5 -> 4), the same
/// rule the model's training tooling uses. Infinite scores clip to the
/// nearest bound; only NaN has no grade.
pub fn clip_grade(score: f64) -> Result<Grade, PredictError> {
    if score.is_nan() {
        return Err(PredictError::NanScore);
    }
    let clipped = score
        .round_ties_even()
        .clamp(f64::from(MIN_GRADE), f64::from(MAX_GRADE));
    Ok(Grade(clipped as u8))
}

/// Predicts final grades with a model loaded once up front.
pub struct Predictor {
    model: Box<dyn Regressor>,
}

impl Predictor {
    pub fn new(model: Box<dyn Regressor>) -> Self {
        Predictor { model }
    }

    /// Loads the model artifact at `path` and wraps it.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        load_model(path).map(Predictor::new)
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predicts the grade for one raw record.
    pub fn predict(&self, raw: &RawInput) -> Result<Grade, PredictError> {
        let features = encode(raw)?;
        self.predict_encoded(&features)
    }

    /// Predicts the grade for an already encoded row.
    pub fn predict_encoded(&self, features: &EncodedFeatures) -> Result<Grade, PredictError> {
        let score = self.model.predict(features)?;
        log::debug!("{} model raw score {:.4}", self.model.name(), score);
        clip_grade(score)
    }

    /// Predicts many records in parallel. Results keep the input order.
    pub fn predict_batch(&self, inputs: &[RawInput]) -> Vec<Result<Grade, PredictError>> {
        inputs.par_iter().map(|raw| self.predict(raw)).collect()
    }
}
