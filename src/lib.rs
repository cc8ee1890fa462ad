//! Gradecast library.
//!
//! Predicts a student's final grade (G3) from a questionnaire: the raw
//! answers are encoded into the model's feature row, scored by a
//! pre-trained regression model, then rounded and clipped to [0, 20].

pub mod batch;
pub mod config;
pub mod encoding;
pub mod form;
pub mod logging;
pub mod model;
pub mod predict;
pub mod student;

pub use encoding::{encode, EncodeError, EncodedFeatures, NUM_FEATURES};
pub use predict::{clip_grade, Grade, PredictError, Predictor};
pub use student::{RawInput, RawValue};
