//! In-memory storage backend.
//!
//! Clones share one map, so a test can hand a clone to a store and inspect
//! (or reload from) the same payloads afterwards.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::StorageBackend;
use crate::types::errors::StorageError;

/// Shared-handle HashMap backend for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }

    /// Writes a raw payload directly, bypassing the typed facade. Lets
    /// tests seed corrupt or foreign values.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Reads a raw payload directly.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}
