//! Key-value persistence interface and in-memory backend

use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::MonitorResult;

/// Minimal persistence surface the stores are written against. Values are
/// whole serialized blobs; there is no partial-update protocol.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> MonitorResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> MonitorResult<()>;
    /// Returns true if the key existed.
    fn remove(&self, key: &str) -> MonitorResult<bool>;
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> MonitorResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> MonitorResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> MonitorResult<bool> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        Ok(entries.remove(key).is_some())
    }
}
