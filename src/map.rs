//! Mapping type for Deterministic YAML values.
//!
//! [`Mapping`] wraps an [`IndexMap`] so entries keep the order in which they
//! were parsed or inserted. That order carries no meaning: two mappings with
//! the same entries are equal regardless of order, and the serializer always
//! writes [`Mapping::canonical_entries`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_dyaml::{Mapping, Value, RESERVED_KEY};
//!
//! let mut map = Mapping::new();
//! map.insert("port".to_string(), Value::from(5432));
//! map.insert("host".to_string(), Value::from("localhost"));
//! map.insert(RESERVED_KEY.to_string(), Value::from("primary database"));
//!
//! let keys: Vec<_> = map.canonical_entries().into_iter().map(|(k, _)| k.as_str()).collect();
//! assert_eq!(keys, vec![RESERVED_KEY, "host", "port"]);
//! ```

use crate::grammar::RESERVED_KEY;
use crate::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A map of string keys to values.
///
/// Equality ignores entry order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dyaml::{Mapping, Value};
    ///
    /// let mut map = Mapping::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the annotation text held under the reserved key, if it is a string.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.get(RESERVED_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns the entries in canonical order: the reserved key first, then
    /// every other key in ascending byte order.
    #[must_use]
    pub fn canonical_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|(a, _), (b, _)| {
            let a_reserved = a.as_str() == RESERVED_KEY;
            let b_reserved = b.as_str() == RESERVED_KEY;
            b_reserved.cmp(&a_reserved).then_with(|| a.cmp(b))
        });
        entries
    }
}

impl From<BTreeMap<String, Value>> for Mapping {
    fn from(map: BTreeMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Mapping(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order() {
        let a: Mapping = vec![
            ("x".to_string(), Value::from(1)),
            ("y".to_string(), Value::from(2)),
        ]
        .into_iter()
        .collect();
        let b: Mapping = vec![
            ("y".to_string(), Value::from(2)),
            ("x".to_string(), Value::from(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_entries_byte_order() {
        let map: Mapping = ["b", "Z", "a", "_", RESERVED_KEY, "10", "9"]
            .iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect();
        let keys: Vec<_> = map
            .canonical_entries()
            .into_iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec![RESERVED_KEY, "10", "9", "Z", "_", "a", "b"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: Mapping = ["c", "a", "b"]
            .iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect();
        assert_eq!(map.remove("a"), Some(Value::Null));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["c", "b"]);
    }

    #[test]
    fn test_annotation_accessor() {
        let mut map = Mapping::new();
        assert_eq!(map.annotation(), None);
        map.insert(RESERVED_KEY.to_string(), Value::from("note"));
        assert_eq!(map.annotation(), Some("note"));
    }
}
