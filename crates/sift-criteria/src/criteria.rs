//! The criteria store.
//!
//! [`Criteria`] is an ordered map from criterion name to [`Value`] with two
//! write policies:
//!
//! | Write | Existing key | Missing key |
//! |-------|--------------|-------------|
//! | `set` / `set_all` | overwritten | inserted |
//! | `set_default` / `default_all` | kept unless null | inserted |
//!
//! A key holding [`Value::Null`] reads as absent: `has` is false, `get`
//! returns the fallback and a default may fill it. `false`, `0` and `""` are
//! present like any other value.
//!
//! A search seeds the store with defaults derived from the target table, then
//! applies the caller's overrides on top.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Key/value store of search criteria.
///
/// # Example
///
/// ```
/// use sift_criteria::{Criteria, Value};
///
/// let mut criteria = Criteria::new();
/// criteria.default_all([("limit", Value::from(0)), ("stype", Value::from("contains"))]);
/// criteria.set_all([("limit", Value::from(20))]);
///
/// assert_eq!(criteria.get("limit", 0), Value::from(20));
/// assert_eq!(criteria.get("stype", ""), Value::from("contains"));
/// assert_eq!(criteria.get("start", 0), Value::from(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria {
    values: BTreeMap<String, Value>,
}

impl Criteria {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from defaults, then applies overrides on top.
    pub fn with_defaults(defaults: Criteria, overrides: Criteria) -> Self {
        let mut criteria = defaults;
        criteria.set_all(overrides);
        criteria
    }

    /// Parses a JSON object into a store.
    ///
    /// Keys map to criterion names; nested arrays and objects become
    /// [`Value::List`] and [`Value::Map`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets every pair, overwriting existing keys.
    ///
    /// When the input repeats a key, the last occurrence wins.
    pub fn set_all<K, V, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in values {
            self.set(key, value);
        }
    }

    /// Sets every pair whose key is not already present.
    pub fn default_all<K, V, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in values {
            self.set_default(key, value);
        }
    }

    /// Sets a value only if the key is absent or null.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let slot = self.values.entry(key.into()).or_default();
        if slot.is_null() {
            *slot = value.into();
        }
    }

    /// Sets a value, overwriting any existing one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the stored value, or `fallback` when the key is absent or null.
    pub fn get(&self, key: &str, fallback: impl Into<Value>) -> Value {
        match self.value(key) {
            Some(value) => value.clone(),
            None => fallback.into(),
        }
    }

    /// Returns a reference to the stored value, or `None` when the key is
    /// absent or null.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|value| !value.is_null())
    }

    /// Returns `true` if the key holds a non-null value, however falsy.
    pub fn has(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the stored criteria in key order, nulls included.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    /// Iterates over the criterion names in key order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.values.keys()
    }
}

impl IntoIterator for Criteria {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        criteria.set_all(iter);
        criteria
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Criteria {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
