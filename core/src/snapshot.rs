// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

/// A wire-encoded view of a record: wire field alias to JSON value.
///
/// A full snapshot carries every wire field and is the payload of a create.
/// A partial snapshot (delta) carries only changed fields and is the payload
/// of an edit. A key that is absent means "no change", which is distinct
/// from a key that is present with a null value ("clear the field").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value of a wire field, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the wire field is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a wire field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Iterates over present fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The keys of the present fields, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The fields of `self` whose value differs from `earlier`.
    ///
    /// Used to derive the minimal edit delta: pending changes are re-derived
    /// from this comparison at commit time, so a field changed and then
    /// changed back never shows up.
    #[must_use]
    pub fn diff(&self, earlier: &Snapshot) -> Snapshot {
        self.0
            .iter()
            .filter(|&(key, value)| earlier.0.get(key.as_str()) != Some(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Overwrites the fields present in `delta`, field by field, leaving the
    /// rest untouched.
    pub fn merge(&mut self, delta: &Snapshot) {
        for (key, value) in &delta.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Snapshot> for Map<String, Value> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.0
    }
}

impl FromIterator<(String, Value)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, Value)]) -> Snapshot {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn diff_keeps_only_changed_fields() {
        let earlier = snapshot(&[("tt", "a".into()), ("ss", 0.into()), ("tr", false.into())]);
        let current = snapshot(&[("tt", "b".into()), ("ss", 0.into()), ("tr", false.into())]);

        let delta = current.diff(&earlier);
        assert_eq!(delta.len(), 1);
        assert_eq!(delta.get("tt"), Some(&"b".into()));
    }

    #[test]
    fn diff_of_identical_snapshots_is_empty() {
        let a = snapshot(&[("tt", "a".into()), ("dd", Value::Null)]);
        assert!(a.diff(&a.clone()).is_empty());
    }

    #[test]
    fn diff_distinguishes_null_from_value() {
        let earlier = snapshot(&[("dd", 1_641_234_567.into())]);
        let current = snapshot(&[("dd", Value::Null)]);

        let delta = current.diff(&earlier);
        assert_eq!(delta.get("dd"), Some(&Value::Null));
    }

    #[test]
    fn merge_overwrites_field_by_field() {
        let mut synced = snapshot(&[("tt", "a".into()), ("ss", 0.into())]);
        let delta = snapshot(&[("tt", "b".into())]);

        synced.merge(&delta);
        assert_eq!(synced.get("tt"), Some(&"b".into()));
        assert_eq!(synced.get("ss"), Some(&0.into()));
    }
}
