//! @ai:module:intent Insertion-ordered mapping from task name to a value
//! @ai:module:layer domain
//! @ai:module:public_api TaskMap
//! @ai:module:stateless false

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// @ai:intent Map keyed by task name that iterates in first-insertion order
/// @ai:invariant every key in `index` points at the entry with that name
#[derive(Debug, Clone, PartialEq)]
pub struct TaskMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> TaskMap<V> {
    /// @ai:intent Create an empty map
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// @ai:intent Insert or replace the value for a task, keeping its original position
    pub fn insert(&mut self, task: impl Into<String>, value: V) -> Option<V> {
        let task = task.into();
        match self.index.get(&task) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(task.clone(), self.entries.len());
                self.entries.push((task, value));
                None
            }
        }
    }

    /// @ai:intent Get a mutable value for a task, inserting a default first if absent
    pub fn get_or_insert_default(&mut self, task: &str) -> &mut V
    where
        V: Default,
    {
        let slot = match self.index.get(task) {
            Some(&slot) => slot,
            None => {
                self.index.insert(task.to_string(), self.entries.len());
                self.entries.push((task.to_string(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, task: &str) -> Option<&V> {
        self.index.get(task).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains(&self, task: &str) -> bool {
        self.index.contains_key(task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// @ai:intent Iterate over (task, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(task, value)| (task.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(task, _)| task.as_str())
    }

    /// @ai:intent Apply a function to every value, keeping names and order
    /// @ai:effects pure
    pub fn map_values<U, F>(&self, mut f: F) -> TaskMap<U>
    where
        F: FnMut(&V) -> U,
    {
        TaskMap {
            entries: self
                .entries
                .iter()
                .map(|(task, value)| (task.clone(), f(value)))
                .collect(),
            index: self.index.clone(),
        }
    }
}

impl<V> Default for TaskMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, V)> for TaskMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = TaskMap::new();
        for (task, value) in iter {
            map.insert(task, value);
        }
        map
    }
}

impl<V> IntoIterator for TaskMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for TaskMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (task, value) in &self.entries {
            map.serialize_entry(task, value)?;
        }
        map.end()
    }
}

/// Renders as `{"task": value, ...}` using each value's `Debug` form.
impl<V: fmt::Debug> fmt::Display for TaskMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (task, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", task, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut map = TaskMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("mid", 3);

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = TaskMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 10), Some(1));

        let pairs: Vec<_> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        assert_eq!(pairs, vec![("a".to_string(), 10), ("b".to_string(), 2)]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut map: TaskMap<Vec<f64>> = TaskMap::new();
        map.get_or_insert_default("parse").push(1.0);
        map.get_or_insert_default("parse").push(2.0);

        assert_eq!(map.get("parse"), Some(&vec![1.0, 2.0]));
        assert!(map.get("lex").is_none());
        assert!(map.contains("parse"));
    }

    #[test]
    fn test_collect_result_fails_whole_batch() {
        let items = vec![("a".to_string(), Ok(1)), ("b".to_string(), Err("bad"))];
        let collected: Result<TaskMap<i32>, &str> = items
            .into_iter()
            .map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        assert_eq!(collected, Err("bad"));
    }

    #[test]
    fn test_display_and_serialize() {
        let mut map = TaskMap::new();
        map.insert("parse", vec![1.5, 2.0]);
        map.insert("lex", vec![0.5]);

        assert_eq!(map.to_string(), r#"{"parse": [1.5, 2.0], "lex": [0.5]}"#);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"parse":[1.5,2.0],"lex":[0.5]}"#
        );
    }

    #[test]
    fn test_map_values() {
        let mut map = TaskMap::new();
        map.insert("a", vec![1.0, 2.0]);
        let lens = map.map_values(|v| v.len());
        assert_eq!(lens.get("a"), Some(&2));
    }
}
