//! Open-ended settings mapping.
//!
//! Fields come and go between wizard iterations, so the model is a plain
//! key/value map. Unknown keys are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the setup stage is carried inside [`Settings`].
pub const SETUP_STATUS_KEY: &str = "setupStatus";

/// Settings snapshot as seen by the frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` when it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The setup stage recorded in this snapshot.
    ///
    /// Only a non-empty string counts; `null`, `""` and non-string values are
    /// treated as "no status".
    pub fn setup_status(&self) -> Option<&str> {
        self.get_str(SETUP_STATUS_KEY).filter(|s| !s.is_empty())
    }

    pub fn set_setup_status(&mut self, status: impl Into<String>) {
        self.0
            .insert(SETUP_STATUS_KEY.to_string(), Value::String(status.into()));
    }

    pub fn with_setup_status(mut self, status: impl Into<String>) -> Self {
        self.set_setup_status(status);
        self
    }

    /// Overlay every key of `other` on top of `self`.
    pub fn merge(&mut self, other: Settings) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Separate the setup stage from the rest of the data.
    ///
    /// The status key is always removed from the returned remainder, even when
    /// its value does not count as a status.
    pub fn split_setup_status(mut self) -> (Option<String>, Settings) {
        let status = match self.0.remove(SETUP_STATUS_KEY) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        (status, self)
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Settings {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
