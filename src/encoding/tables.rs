//! Static column schema and categorical lookup tables.
//!
//! Column order is the training-time order of the regression model and
//! must not change without retraining.

use crate::student::RawValue;

use super::EncodeError;

/// Number of model input columns.
pub const NUM_FEATURES: usize = 32;

/// A categorical lookup with a fallback code for unlisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMap {
    pub entries: &'static [(&'static str, u8)],
    pub default: u8,
}

impl CategoryMap {
    /// Returns the code for `value`, or the default when it is not listed.
    pub fn lookup(&self, value: &str) -> u8 {
        self.entries
            .iter()
            .find(|(name, _)| *name == value)
            .map_or(self.default, |&(_, code)| code)
    }
}

/// Mother's job.
pub const MJOB: CategoryMap = CategoryMap {
    entries: &[
        ("at_home", 0),
        ("other", 1),
        ("services", 2),
        ("teacher", 3),
        ("health", 4),
    ],
    default: 1,
};

/// Father's job. Note `health` and `teacher` swap codes relative to `MJOB`.
pub const FJOB: CategoryMap = CategoryMap {
    entries: &[
        ("at_home", 0),
        ("other", 1),
        ("services", 2),
        ("health", 3),
        ("teacher", 4),
    ],
    default: 1,
};

/// Reason for choosing the school.
pub const REASON: CategoryMap = CategoryMap {
    entries: &[("course", 0), ("home", 1), ("reputation", 2), ("other", 3)],
    default: 3,
};

pub const GUARDIAN: CategoryMap = CategoryMap {
    entries: &[("other", 0), ("mother", 1), ("father", 2)],
    default: 0,
};

/// How one raw attribute becomes one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// 1 when the value is exactly this text, otherwise 0.
    Equals(&'static str),
    /// Table code, falling back to the table default.
    Lookup(&'static CategoryMap),
    /// Numeric value copied through unchanged.
    Passthrough,
}

impl Rule {
    /// Applies the rule to a captured value.
    ///
    /// Only `Passthrough` can fail. Non-text values never match an
    /// `Equals` or `Lookup` entry and take the 0 / default path.
    pub fn apply(&self, field: &'static str, value: &RawValue) -> Result<f64, EncodeError> {
        match self {
            Rule::Equals(expected) => Ok(if value.as_text() == Some(*expected) {
                1.0
            } else {
                0.0
            }),
            Rule::Lookup(map) => {
                let code = value.as_text().map_or(map.default, |text| map.lookup(text));
                Ok(f64::from(code))
            }
            Rule::Passthrough => value.as_number().ok_or_else(|| EncodeError::NotNumeric {
                field,
                value: value.to_string(),
            }),
        }
    }
}

/// One model input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub rule: Rule,
}

const fn col(name: &'static str, rule: Rule) -> Column {
    Column { name, rule }
}

const YES: Rule = Rule::Equals("yes");
const PASS: Rule = Rule::Passthrough;

/// All model columns in training order.
pub static COLUMNS: [Column; NUM_FEATURES] = [
    col("school", Rule::Equals("GP")),
    col("sex", Rule::Equals("F")),
    col("age", PASS),
    col("address", Rule::Equals("U")),
    col("famsize", Rule::Equals("LE3")),
    col("Pstatus", Rule::Equals("A")),
    col("Medu", PASS),
    col("Fedu", PASS),
    col("Mjob", Rule::Lookup(&MJOB)),
    col("Fjob", Rule::Lookup(&FJOB)),
    col("reason", Rule::Lookup(&REASON)),
    col("guardian", Rule::Lookup(&GUARDIAN)),
    col("traveltime", PASS),
    col("studytime", PASS),
    col("failures", PASS),
    col("schoolsup", YES),
    col("famsup", YES),
    col("paid", YES),
    col("activities", YES),
    col("nursery", YES),
    col("higher", YES),
    col("internet", YES),
    col("romantic", YES),
    col("famrel", PASS),
    col("freetime", PASS),
    col("goout", PASS),
    col("Dalc", PASS),
    col("Walc", PASS),
    col("health", PASS),
    col("absences", PASS),
    col("G1", PASS),
    col("G2", PASS),
];

/// Column index of a feature name.
pub fn feature_index(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.name == name)
}
