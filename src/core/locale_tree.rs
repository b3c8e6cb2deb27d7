//! In-memory locale tree: a JSON object whose leaves are strings.
//!
//! The tree is addressed by dotted paths (`Billing.heading.invoice_overview`).
//! Reading and writing locale files happens in [`crate::project::locales`]; this module
//! only manipulates the parsed value.

use serde_json::{Map, Value};
use thiserror::Error;

use super::data::ExtractedItem;
use super::naming::key_for_item;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleTreeError {
    #[error("cannot insert `{path}`: `{conflict}` already holds a value")]
    LeafConflict { path: String, conflict: String },
    #[error("locale root must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// What a single insert did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
}

/// Keys touched by [`LocaleTree::merge_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Keys written by this merge, in item order.
    pub added: Vec<String>,
    /// Items whose text was already stored under their key.
    pub existing: usize,
    /// Items dropped by the text validator.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTree {
    root: Map<String, Value>,
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, LocaleTreeError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(LocaleTreeError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// All string leaves as `(dotted path, value)`, in document order.
    ///
    /// Non-string scalars and arrays are not part of the locale model and are skipped.
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut leaves = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut leaves);
        leaves
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        current.as_str()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Insert a string leaf, creating intermediate objects as needed.
    ///
    /// Fails with [`LocaleTreeError::LeafConflict`] when a prefix of `path` is a string
    /// leaf, or when `path` itself names an object.
    pub fn insert(&mut self, path: &str, value: &str) -> Result<KeyAction, LocaleTreeError> {
        let segments: Vec<&str> = path.split('.').collect();
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| conflict(path, path))?;

        let mut current = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let next = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = match next {
                Value::Object(map) => map,
                _ => return Err(conflict(path, &segments[..=depth].join("."))),
            };
        }

        let action = match current.get(*last) {
            Some(Value::String(existing)) if existing == value => return Ok(KeyAction::Unchanged),
            Some(Value::Object(_)) => return Err(conflict(path, path)),
            Some(_) => KeyAction::Updated,
            None => KeyAction::Added,
        };
        current.insert(last.to_string(), Value::String(value.to_string()));
        Ok(action)
    }

    /// Merge extracted items under `namespace`.
    ///
    /// A key already holding a different text is suffixed (`_2`, `_3`, ...) until a free
    /// key or one holding the same text is found.
    pub fn merge_items(
        &mut self,
        namespace: &str,
        items: &[ExtractedItem],
    ) -> Result<MergeSummary, LocaleTreeError> {
        let mut summary = MergeSummary::default();

        for item in items {
            let Some(base_key) = key_for_item(namespace, item) else {
                summary.skipped += 1;
                continue;
            };

            let mut key = base_key.clone();
            let mut suffix = 1;
            loop {
                match self.get(&key) {
                    Some(existing) if existing == item.text => {
                        summary.existing += 1;
                        break;
                    }
                    Some(_) => {
                        suffix += 1;
                        key = format!("{base_key}_{suffix}");
                    }
                    None => {
                        self.insert(&key, &item.text)?;
                        summary.added.push(key);
                        break;
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Default-locale paths that do not resolve in this tree.
    pub fn missing_from(&self, reference: &LocaleTree) -> Vec<String> {
        reference
            .leaves()
            .into_iter()
            .filter(|(path, _)| !self.contains(path))
            .map(|(path, _)| path)
            .collect()
    }

    /// Copy every leaf of `reference` missing here, using the reference text as value.
    /// Returns the paths that were added.
    pub fn sync_from(&mut self, reference: &LocaleTree) -> Result<Vec<String>, LocaleTreeError> {
        let mut added = Vec::new();
        for (path, value) in reference.leaves() {
            if !self.contains(&path) {
                self.insert(&path, value)?;
                added.push(path);
            }
        }
        Ok(added)
    }
}

fn conflict(path: &str, at: &str) -> LocaleTreeError {
    LocaleTreeError::LeafConflict {
        path: path.to_string(),
        conflict: at.to_string(),
    }
}

fn collect_leaves<'a>(
    map: &'a Map<String, Value>,
    prefix: &mut Vec<&'a str>,
    out: &mut Vec<(String, &'a str)>,
) {
    for (key, value) in map {
        prefix.push(key);
        match value {
            Value::String(text) => out.push((prefix.join("."), text)),
            Value::Object(child) => collect_leaves(child, prefix, out),
            _ => {}
        }
        prefix.pop();
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
