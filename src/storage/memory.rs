use std::collections::BTreeMap;

use super::Storage;
use crate::Result;

/// In-memory storage backend.
///
/// Nothing touches disk; useful for tests and for embedding the cart in a
/// host that owns persistence itself.
///
/// ```
/// use neoncart::storage::{MemoryStorage, Storage};
///
/// let mut s = MemoryStorage::new();
/// s.set_item("k", "[]").unwrap();
/// assert_eq!(s.get_item("k").unwrap().as_deref(), Some("[]"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, e.g. with deliberately corrupt content in tests.
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut s = MemoryStorage::new();
        assert!(s.get_item("a").unwrap().is_none());
        s.set_item("a", "1").unwrap();
        s.set_item("a", "2").unwrap();
        assert_eq!(s.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(s.len(), 1);
        s.remove_item("a").unwrap();
        s.remove_item("a").unwrap();
        assert!(s.is_empty());
    }
}
