use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single captured attribute value.
///
/// JSON numbers become `Number`, strings become `Text`. Anything else
/// (booleans, nulls, nested values) is kept as `Other` so that unrelated
/// keys never make a whole record unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Returns the text of a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric reading of the value.
    ///
    /// Text is accepted when it parses as a finite number, since form and
    /// CSV answers arrive as strings. "NaN" and "inf" are not numbers here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            RawValue::Other(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Number(f64::from(n))
    }
}

/// The unencoded attribute set for one student.
///
/// Serializes as a flat JSON object. Keys the encoder does not recognize
/// are carried along and ignored at encoding time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    values: BTreeMap<String, RawValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of `insert`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = RawInput::new();
        for (k, v) in iter {
            raw.insert(k, v);
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_values() {
        let raw: RawInput =
            serde_json::from_str(r#"{"school":"GP","age":17,"flag":true,"note":null}"#).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw.get("school"), Some(&RawValue::Text("GP".to_string())));
        assert_eq!(raw.get("age"), Some(&RawValue::Number(17.0)));
        assert!(matches!(raw.get("flag"), Some(RawValue::Other(_))));
    }

    #[test]
    fn numeric_text_reads_as_number() {
        assert_eq!(RawValue::from(" 16 ").as_number(), Some(16.0));
        assert_eq!(RawValue::from("sixteen").as_number(), None);
        assert_eq!(RawValue::from(4).as_number(), Some(4.0));
        assert_eq!(RawValue::Other(serde_json::Value::Bool(true)).as_number(), None);
    }

    #[test]
    fn non_finite_text_is_not_a_number() {
        for text in ["NaN", "nan", "inf", "-inf", "infinity", " +Infinity "] {
            assert_eq!(RawValue::from(text).as_number(), None, "{:?}", text);
        }
        assert_eq!(RawValue::from("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn only_text_has_text() {
        assert_eq!(RawValue::from("yes").as_text(), Some("yes"));
        assert_eq!(RawValue::from(1).as_text(), None);
    }

    #[test]
    fn builder_and_collect_agree() {
        let built = RawInput::new().with("sex", "F").with("G1", 12);
        let collected: RawInput = vec![("G1", RawValue::from(12)), ("sex", RawValue::from("F"))]
            .into_iter()
            .collect();
        assert_eq!(built, collected);
    }

    #[test]
    fn serializes_as_flat_object() {
        let raw = RawInput::new().with("Mjob", "teacher").with("age", 16);
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, r#"{"Mjob":"teacher","age":16.0}"#);
    }
}
