//! Named registry: the storage behind both container namespaces.
//!
//! The value store and the factory store are two independent
//! `Registry` instances, so the same name can live in both.

use std::collections::HashMap;

use tracing::{debug, trace};

/// Maps names to entries of one kind.
///
/// Setting an existing name replaces its entry; there is no history.
#[derive(Debug)]
pub(crate) struct Registry<V> {
    kind: &'static str,
    entries: HashMap<String, V>,
}

impl<V> Registry<V> {
    /// Creates an empty registry. `kind` labels log events.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Stores `entry` under `name`, returning the replaced entry.
    pub fn insert(&mut self, name: String, entry: V) -> Option<V> {
        let replaced = self.entries.contains_key(&name);
        debug!(kind = self.kind, name = %name, replaced, "Registered");
        self.entries.insert(name, entry)
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        let entry = self.entries.get(name);
        if entry.is_none() {
            trace!(kind = self.kind, name, "Name not registered");
        }
        entry
    }

    /// Removes the entry for `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            debug!(kind = self.kind, name, "Cleared registration");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
