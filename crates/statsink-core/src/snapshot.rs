//! Dotted-path JSON tree used to render flat stats as nested objects.
//!
//! `a.b.c` creates (or walks) objects `a` and `b` and sets key `c`. Any leaf
//! found along the way is replaced by an object, so the last write to a
//! conflicting path wins.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotTree {
    root: Value,
}

impl Default for SnapshotTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotTree {
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Tree with an empty object already placed at `prefix` (no-op when empty).
    pub fn with_root(prefix: &str) -> Self {
        let mut tree = Self::new();
        if !prefix.is_empty() {
            tree.set_path(Value::Object(Map::new()), prefix);
        }
        tree
    }

    /// Set `value` at a dotted path. An empty path replaces the whole tree.
    pub fn set_path(&mut self, value: Value, path: &str) {
        if path.is_empty() {
            self.root = value;
            return;
        }

        let mut segments = path.split('.').peekable();
        let mut cur = &mut self.root;
        while let Some(seg) = segments.next() {
            if !cur.is_object() {
                *cur = Value::Object(Map::new());
            }
            let Value::Object(map) = cur else { return };

            if segments.peek().is_none() {
                map.insert(seg.to_string(), value);
                return;
            }
            cur = map
                .entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }

    /// Look up a dotted path. An empty path returns the whole tree.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.').try_fold(&self.root, |cur, seg| cur.get(seg))
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn to_json_string(&self) -> String {
        self.root.to_string()
    }
}
