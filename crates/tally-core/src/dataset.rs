//! Flattened view over nested request data
//!
//! A [`DataSet`] turns an arbitrary JSON-like value into a registry of
//! dotted paths. Every reachable node is recorded, containers included, so
//! that both "does `a.b` hold a scalar" and "is `a` a container at all" can be
//! answered by a single lookup. List members are addressed by their index,
//! object members by their key: `{"a": [{"b": 1}]}` yields `a`, `a.0` and
//! `a.0.b`.
//!
//! Input must be acyclic, which any deserialized request body is.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved key under which the root value is addressed.
///
/// Never produced by flattening and never returned by pattern matching.
pub const ROOT_KEY: &str = "7a5f04b1-8ebc-4c35-976d-79e2b4cb1f0d";

/// Path separator used when joining segments
pub const SEPARATOR: char = '.';

/// Flattened registry of every node reachable from a root value
#[derive(Debug, Clone)]
pub struct DataSet<'a> {
    root: &'a Value,
    entries: BTreeMap<String, &'a Value>,
}

impl<'a> DataSet<'a> {
    /// Flatten `root` into a new data set
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            entries: flatten(root),
        }
    }

    /// The value the data set was built from
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Look up the value stored at `path`.
    ///
    /// [`ROOT_KEY`] resolves to the root value.
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        if path == ROOT_KEY {
            return Some(self.root);
        }
        self.entries.get(path).copied()
    }

    /// Look up a non-root entry, returning the stored path alongside the value
    pub fn entry(&self, path: &str) -> Option<(&str, &'a Value)> {
        self.entries
            .get_key_value(path)
            .map(|(path, value)| (path.as_str(), *value))
    }

    /// Whether a node exists at `path` (null values count as existing)
    pub fn contains(&self, path: &str) -> bool {
        path == ROOT_KEY || self.entries.contains_key(path)
    }

    /// All non-root paths in lexicographic order
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// All non-root entries in lexicographic path order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &'a Value)> + '_ {
        self.entries.iter().map(|(path, value)| (path.as_str(), *value))
    }

    /// Number of recorded nodes, the root included
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Whether the root has no descendants
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flatten a value into a path → value registry.
///
/// The traversal is depth-first over an explicit worklist so that deeply
/// nested input cannot exhaust the call stack. The root itself is not part of
/// the returned map; see [`DataSet`] for root addressing. When two nodes map
/// to the same dotted path (object keys that themselves contain a dot) the
/// first one recorded is kept.
pub fn flatten(root: &Value) -> BTreeMap<String, &Value> {
    let mut out = BTreeMap::new();
    let mut stack: Vec<(Option<String>, &Value)> = vec![(None, root)];

    while let Some((prefix, value)) = stack.pop() {
        let children: Vec<(String, &Value)> = match value {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => continue,
        };

        for (segment, child) in children {
            let path = join(prefix.as_deref(), &segment);
            if is_container(child) {
                stack.push((Some(path.clone()), child));
            }
            out.entry(path).or_insert(child);
        }
    }

    out
}

/// Join a parent path and a child segment; `None` is the root
pub fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, SEPARATOR, segment),
        None => segment.to_string(),
    }
}

/// Whether a value is a list or an object
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}
