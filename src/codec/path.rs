//! Dotted-path mapping between nested variable trees and flat field lists.
//!
//! A dotted path such as `lead.first_name` addresses one location in a
//! [`VariableTree`]. [`flatten`] walks a tree into ordered `(path, leaf)`
//! pairs, [`unflatten`] rebuilds a tree from such pairs, and
//! [`Projection`] keeps only the requested paths while remembering which
//! of them were absent.

use serde_json::{Map, Value};

/// Nested key/value data flowing through an adapter.
pub type VariableTree = Value;

/// Resolve a dotted path. JSON `null` counts as absent.
///
/// Numeric segments index into arrays.
pub fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Flatten a tree into one entry per leaf, in document order.
///
/// Arrays and empty objects are leaves: they are kept whole under their
/// own path rather than being split into indexed entries. A non-object
/// root yields nothing.
pub fn flatten(tree: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Object(map) = tree {
        flatten_into(map, None, &mut out);
    }
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(child) if !child.is_empty() => flatten_into(child, Some(&path), out),
            _ => out.push((path, value.clone())),
        }
    }
}

/// Ordered dotted paths of every leaf under `tree`, each prefixed with
/// `root`. Used to turn an arbitrary subtree into a field list.
pub fn leaf_paths(root: &str, tree: &Value) -> Vec<String> {
    match tree {
        Value::Object(map) if !map.is_empty() => {
            let mut out = Vec::new();
            flatten_into(map, Some(root), &mut out);
            out.into_iter().map(|(path, _)| path).collect()
        }
        _ => vec![root.to_string()],
    }
}

/// Rebuild a tree from `(dotted path, value)` pairs.
///
/// Later pairs overwrite earlier ones at the same path, keeping the
/// first position. A scalar sitting where a later path needs an object
/// is replaced by that object.
pub fn unflatten<I>(entries: I) -> Value
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut root = Map::new();
    for (path, value) in entries {
        insert_path(&mut root, &path, value);
    }
    Value::Object(root)
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }
}

/// Recursively overlay `overlay` onto `base`. Objects merge key by key;
/// any other overlay value replaces what was there.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value)
                    }
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// One position in a [`Projection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// The field was requested but the source tree had nothing there.
    Missing,
    /// A present value. May still be an object or array if a field path
    /// addressed a whole subtree.
    Value(Value),
    /// Nested fields sharing this segment as a prefix.
    Branch(Projection),
}

/// A tree of requested fields in declared order.
///
/// Unlike a plain [`VariableTree`] it can hold [`Slot::Missing`], which
/// each output format renders differently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    entries: Vec<(String, Slot)>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project `tree` down to `fields`, preserving field order and
    /// re-nesting paths that share a prefix under one branch.
    pub fn project<S: AsRef<str>>(tree: &Value, fields: &[S]) -> Self {
        let mut projection = Self::new();
        for field in fields {
            let field = field.as_ref();
            let slot = match lookup(tree, field) {
                Some(value) => Slot::Value(value.clone()),
                None => Slot::Missing,
            };
            projection.insert(field, slot);
        }
        projection
    }

    /// Place `slot` at a dotted path.
    pub fn insert(&mut self, path: &str, slot: Slot) {
        match path.split_once('.') {
            None => self.set(path, slot),
            Some((head, rest)) => {
                let index = match self.position(head) {
                    Some(i) => {
                        if !matches!(self.entries[i].1, Slot::Branch(_)) {
                            self.entries[i].1 = Slot::Branch(Projection::new());
                        }
                        i
                    }
                    None => {
                        self.entries.push((head.to_string(), Slot::Branch(Projection::new())));
                        self.entries.len() - 1
                    }
                };
                if let Slot::Branch(child) = &mut self.entries[index].1 {
                    child.insert(rest, slot);
                }
            }
        }
    }

    /// Replace the top-level slot named `key`, or append it.
    pub fn set(&mut self, key: &str, slot: Slot) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = slot,
            None => self.entries.push((key.to_string(), slot)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, slot)| slot)
    }

    /// The present top-level value named `key`.
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key) {
            Some(Slot::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.entries.iter().map(|(k, slot)| (k.as_str(), slot))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leaf slots in order, keyed by their full dotted path.
    pub fn leaves(&self) -> Vec<(String, &Slot)> {
        let mut out = Vec::new();
        self.leaves_into(None, &mut out);
        out
    }

    fn leaves_into<'a>(&'a self, prefix: Option<&str>, out: &mut Vec<(String, &'a Slot)>) {
        for (key, slot) in &self.entries {
            let path = match prefix {
                Some(p) => format!("{p}.{key}"),
                None => key.clone(),
            };
            match slot {
                Slot::Branch(child) => child.leaves_into(Some(&path), out),
                _ => out.push((path, slot)),
            }
        }
    }

    /// Convert to a plain tree. Missing fields are dropped.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, slot) in &self.entries {
            match slot {
                Slot::Missing => {}
                Slot::Value(value) => {
                    map.insert(key.clone(), value.clone());
                }
                Slot::Branch(child) => {
                    map.insert(key.clone(), child.to_json());
                }
            }
        }
        Value::Object(map)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
