// Feature generator trait — the extension point for new email features.
//
// A generator reads an email and returns a small map of named values. It
// also declares the names it will produce so the registry can list them
// without running anything. Adding a generator never requires touching the
// existing ones; register it alongside them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::models::Email;

/// A single feature value: a count/flag, a measurement, or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value. Text has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(i) => Some(*i as f64),
            FeatureValue::Float(f) => Some(*f),
            FeatureValue::Text(_) => None,
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

/// Named feature values. Ordered so serialized output is stable.
pub type FeatureSet = BTreeMap<String, FeatureValue>;

/// Trait for computing features from an email. Implementations must be pure:
/// the same email always yields the same map.
pub trait FeatureGenerator: Send + Sync {
    /// Compute this generator's features, keyed by unprefixed feature name.
    fn generate(&self, email: &Email) -> FeatureSet;

    /// The feature names `generate` produces.
    fn feature_names(&self) -> &[&'static str];
}
