//! Raw student record -> numeric feature row.
//!
//! Produces the fixed 32-column row the regression model was trained on.
//! Column layout (training order):
//!   [0:8]   school, sex, age, address, famsize, Pstatus, Medu, Fedu
//!   [8:12]  Mjob, Fjob, reason, guardian      (table lookups)
//!   [12:15] traveltime, studytime, failures
//!   [15:23] schoolsup .. romantic              ("yes" flags)
//!   [23:32] famrel, freetime, goout, Dalc, Walc, health, absences, G1, G2
//!
//! Binary text fields become 0/1, the four categorical fields go through
//! `CategoryMap` tables, and numeric fields pass through without range
//! checks. Unlisted categories silently take the table default.

mod tables;

pub use tables::{
    feature_index, CategoryMap, Column, Rule, COLUMNS, FJOB, GUARDIAN, MJOB, NUM_FEATURES, REASON,
};

use crate::student::RawInput;

/// Errors that can occur while encoding a raw record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' expects a number, got '{value}'")]
    NotNumeric { field: &'static str, value: String },
}

/// A numeric feature row in training column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedFeatures {
    values: [f64; NUM_FEATURES],
}

impl EncodedFeatures {
    /// Wraps an already-ordered row.
    pub fn from_values(values: [f64; NUM_FEATURES]) -> Self {
        EncodedFeatures { values }
    }

    /// Value of a named column.
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.values[i])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Single-precision copy of the row for runtimes that take f32 input.
    pub fn to_f32_row(&self) -> [f32; NUM_FEATURES] {
        self.values.map(|v| v as f32)
    }

    /// Column names in training order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        COLUMNS.iter().map(|c| c.name)
    }

    /// `(name, value)` pairs in training order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        COLUMNS.iter().map(|c| c.name).zip(self.values.iter().copied())
    }
}

/// Encodes a raw record into a model row.
///
/// Keys outside the schema are ignored. A missing schema key, or a numeric
/// field that does not read as a number, is an error.
pub fn encode(raw: &RawInput) -> Result<EncodedFeatures, EncodeError> {
    let mut values = [0.0f64; NUM_FEATURES];
    for (slot, column) in values.iter_mut().zip(COLUMNS.iter()) {
        let value = raw
            .get(column.name)
            .ok_or(EncodeError::MissingField(column.name))?;
        *slot = column.rule.apply(column.name, value)?;
    }
    Ok(EncodedFeatures { values })
}
