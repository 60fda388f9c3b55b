//! Typed accessors for persisted criteria and preferences

use std::sync::Arc;
use tracing::warn;

use crate::errors::MonitorResult;
use crate::types::{FilterCriteria, Settings};

use super::{FILTERS_KEY, KeyValueStore, SETTINGS_KEY};

/// Wraps a shared backend with typed load/save for the last-used screening
/// criteria and the UI preferences. Corrupt payloads fall back to defaults
/// with a warning rather than failing the caller.
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn KeyValueStore>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn load_filters(&self) -> MonitorResult<FilterCriteria> {
        self.load_or(FILTERS_KEY, FilterCriteria::default())
    }

    /// Like `load_filters`, but falls back to `fallback` when nothing is
    /// stored yet (e.g. config-seeded criteria on first run).
    pub fn load_filters_or(&self, fallback: FilterCriteria) -> MonitorResult<FilterCriteria> {
        self.load_or(FILTERS_KEY, fallback)
    }

    pub fn save_filters(&self, criteria: &FilterCriteria) -> MonitorResult<()> {
        self.save(FILTERS_KEY, criteria)
    }

    pub fn load_settings(&self) -> MonitorResult<Settings> {
        self.load_or(SETTINGS_KEY, Settings::default())
    }

    pub fn save_settings(&self, settings: &Settings) -> MonitorResult<()> {
        self.save(SETTINGS_KEY, settings)
    }

    fn load_or<T>(&self, key: &str, fallback: T) -> MonitorResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.backend.load(key)? {
            None => Ok(fallback),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(e) => {
                    warn!(key, error = %e, "Stored payload unreadable, using defaults");
                    Ok(fallback)
                }
            },
        }
    }

    fn save<T: serde::Serialize>(&self, key: &str, value: &T) -> MonitorResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| crate::errors::MonitorError::storage(format!("serialize {}", key), e))?;
        self.backend.save(key, &raw)
    }
}
