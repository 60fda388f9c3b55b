//! Explicitly constructed application context
//!
//! Everything that used to be ambient state lives here and is passed to the
//! components that need it; nothing in the crate reads a global.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::MonitorResult;
use crate::generator::generate_opportunities;
use crate::rules::RuleStore;
use crate::screening;
use crate::storage::{KeyValueStore, StateStore};
use crate::types::{FilterCriteria, Opportunity, Settings};

pub struct AppContext {
    pub config: Config,
    pub rules: RuleStore,
    state: StateStore,
    criteria: FilterCriteria,
    settings: Settings,
    /// Record cache owned here; renderers only ever borrow it.
    cache: Vec<Opportunity>,
    /// Distinguishes "no data yet" from a legitimately empty screen result.
    loaded: bool,
}

impl AppContext {
    /// Wire the context onto one shared persistence backend, restoring the
    /// last-used criteria and preferences.
    pub fn new(config: Config, backend: Arc<dyn KeyValueStore>) -> MonitorResult<Self> {
        let state = StateStore::new(backend.clone());
        let criteria = state.load_filters_or(FilterCriteria::from_config(&config))?;
        let settings = state.load_settings()?;
        let rules = RuleStore::new(backend)?;

        Ok(Self {
            config,
            rules,
            state,
            criteria,
            settings,
            cache: Vec::new(),
            loaded: false,
        })
    }

    /// Replace the cached record set with a fresh mock batch.
    pub fn refresh(&mut self) -> usize {
        let batch = generate_opportunities(&self.criteria);
        self.cache = batch.opportunities;
        self.loaded = true;
        self.cache.len()
    }

    /// Screen the cached records against the current criteria.
    pub fn screened(&self) -> Vec<Opportunity> {
        screening::apply(&self.cache, &self.criteria)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> MonitorResult<()> {
        self.state.save_filters(&criteria)?;
        self.criteria = criteria;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> MonitorResult<()> {
        self.state.save_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }
}
