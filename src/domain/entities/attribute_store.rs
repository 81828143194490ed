//! Attribute store
//!
//! Plain keyed container for the values that mirror a record's columns.
//! It performs no validation; the owning entity re-validates after writes.

use serde_json::{Map, Value};

/// Column map exchanged with persistence gateways
pub type RawRecord = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    values: RawRecord,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with every declared key present and set to `null`
    pub fn with_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            values: keys
                .into_iter()
                .map(|k| (k.to_string(), Value::Null))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Overwrite existing keys and add new ones
    pub fn merge(&mut self, attributes: RawRecord) {
        self.values.extend(attributes);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &RawRecord {
        &self.values
    }

    pub fn to_map(&self) -> RawRecord {
        self.values.clone()
    }
}

impl From<RawRecord> for AttributeStore {
    fn from(values: RawRecord) -> Self {
        Self { values }
    }
}
