//! Key-value persistence for the serialized list.
use crate::error::StoreError;
use std::collections::HashMap;

/// Storage slot the list is written to unless a controller overrides it.
pub const STORAGE_KEY: &str = "todos-next-app";

/// A durable key-value slot holding string values, in the shape of browser
/// local storage.
pub trait PersistentStore {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store. State lives only as long as the value does.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `value` already written under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Reads a slot without going through the fallible trait method.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PersistentStore + ?Sized> PersistentStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = MemoryStore::with_value(STORAGE_KEY, "[]");

        store.set(STORAGE_KEY, "[1]").unwrap();

        assert_eq!(store.get(STORAGE_KEY).unwrap(), Some("[1]".to_string()));
        assert_eq!(store.value(STORAGE_KEY), Some("[1]"));
    }

    #[test]
    fn slots_are_independent() {
        let mut store = MemoryStore::new();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert_eq!(store.value("a"), Some("1"));
        assert_eq!(store.value("b"), Some("2"));
    }
}
