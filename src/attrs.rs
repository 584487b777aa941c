//! AttributeStore
//!
//! Free-form string attributes keyed by full path, independent of node
//! lifetime. Entries set for a path survive deletion of the node at that
//! path; a later node created at the same path sees them again. Path
//! validation against the live tree is the façade's job; this store is a
//! plain map.

use std::collections::{BTreeMap, HashMap};

/// Per-path attribute map: path -> attribute name -> value.
#[derive(Debug, Default)]
pub struct AttributeStore {
    entries: HashMap<String, BTreeMap<String, String>>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attribute, creating the per-path map lazily.
    pub fn set(&mut self, node_path: &str, attribute: &str, value: &str) {
        self.entries
            .entry(node_path.to_string())
            .or_default()
            .insert(attribute.to_string(), value.to_string());
    }

    /// Look up an attribute; `None` means not set, which callers must
    /// keep distinguishable from an empty value.
    pub fn get(&self, node_path: &str, attribute: &str) -> Option<&str> {
        self.entries
            .get(node_path)
            .and_then(|attrs| attrs.get(attribute))
            .map(String::as_str)
    }

    /// Drop one attribute, returning its previous value. Lets callers
    /// reclaim entries orphaned by node deletion.
    pub fn remove(&mut self, node_path: &str, attribute: &str) -> Option<String> {
        let attrs = self.entries.get_mut(node_path)?;
        let removed = attrs.remove(attribute);
        if attrs.is_empty() {
            self.entries.remove(node_path);
        }
        removed
    }
}
