use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One annotatable row. Fields keep the order they were read in so that
/// untouched rows are written back exactly as they came.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    /// Display text of a field. Strings come back verbatim, `null` and
    /// missing fields as `None`, anything else as compact JSON.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Sets `field` to a string value, keeping its position if it already exists.
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), Value::String(value.into()));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}
