//! Rule store: validated CRUD over an injectable persistence backend

use chrono::Utc;
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{MonitorError, MonitorResult};
use crate::storage::{KeyValueStore, RULES_KEY};
use crate::types::{Rule, RuleDraft};

/// Owns the persisted rule list. Every mutation validates first, then writes
/// the whole list back as one JSON blob; a failed write rolls the in-memory
/// list back so no mutation is ever partially applied.
pub struct RuleStore {
    backend: Arc<dyn KeyValueStore>,
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Loads existing rules from the backend. An unreadable blob is treated
    /// like an empty list so a corrupt state file cannot brick startup.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> MonitorResult<Self> {
        let rules = match backend.load(RULES_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(rules) => rules,
                Err(e) => {
                    warn!(error = %e, "Stored rules unreadable, starting with an empty list");
                    Vec::new()
                }
            },
        };
        Ok(Self { backend, rules })
    }

    pub fn create(&mut self, draft: RuleDraft) -> MonitorResult<Rule> {
        validate(&draft)?;

        let now = Utc::now();
        let rule = Rule {
            id: format!("RULE_{}", Uuid::new_v4()),
            name: draft.name.trim().to_string(),
            symbol: draft.symbol,
            long_exchange: draft.long_exchange,
            short_exchange: draft.short_exchange,
            min_profit: draft.min_profit,
            max_order_amount: draft.max_order_amount,
            take_profit_percentage: draft.take_profit_percentage,
            stop_loss_percentage: draft.stop_loss_percentage,
            max_floating_loss: draft.max_floating_loss,
            max_holding_time_hours: draft.max_holding_time_hours,
            created_at: now,
            updated_at: now,
        };

        self.rules.push(rule.clone());
        if let Err(e) = self.persist() {
            self.rules.pop();
            return Err(e);
        }

        info!(rule_id = %rule.id, name = %rule.name, "Rule created");
        Ok(rule)
    }

    /// Full replacement of the user fields; id and created_at survive the
    /// edit, updated_at is bumped.
    pub fn update(&mut self, id: &str, draft: RuleDraft) -> MonitorResult<Rule> {
        validate(&draft)?;

        let index = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| MonitorError::NotFound { id: id.to_string() })?;

        let previous = self.rules[index].clone();
        let updated = Rule {
            id: previous.id.clone(),
            name: draft.name.trim().to_string(),
            symbol: draft.symbol,
            long_exchange: draft.long_exchange,
            short_exchange: draft.short_exchange,
            min_profit: draft.min_profit,
            max_order_amount: draft.max_order_amount,
            take_profit_percentage: draft.take_profit_percentage,
            stop_loss_percentage: draft.stop_loss_percentage,
            max_floating_loss: draft.max_floating_loss,
            max_holding_time_hours: draft.max_holding_time_hours,
            created_at: previous.created_at,
            updated_at: Utc::now(),
        };

        self.rules[index] = updated.clone();
        if let Err(e) = self.persist() {
            self.rules[index] = previous;
            return Err(e);
        }

        info!(rule_id = %updated.id, "Rule updated");
        Ok(updated)
    }

    /// Returns true if a rule with this id was removed. Ids are UUID-based
    /// and never reused after deletion.
    pub fn delete(&mut self, id: &str) -> MonitorResult<bool> {
        let Some(index) = self.rules.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let removed = self.rules.remove(index);
        if let Err(e) = self.persist() {
            self.rules.insert(index, removed);
            return Err(e);
        }

        info!(rule_id = %id, "Rule deleted");
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn list(&self) -> &[Rule] {
        &self.rules
    }

    /// Pretty-printed JSON array of the full list, ready to download.
    pub fn export_json(&self) -> MonitorResult<String> {
        serde_json::to_string_pretty(&self.rules)
            .map_err(|e| MonitorError::storage("serialize rules export", e))
    }

    /// Replaces the stored list wholesale with the parsed payload. The
    /// top-level value must be a JSON array of objects.
    pub fn import_json(&mut self, payload: &str) -> MonitorResult<usize> {
        let value: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
            MonitorError::Format { reason: format!("payload is not valid JSON: {}", e) }
        })?;

        let items = value.as_array().ok_or_else(|| MonitorError::Format {
            reason: "payload must be a JSON array of rules".to_string(),
        })?;
        if let Some(pos) = items.iter().position(|item| !item.is_object()) {
            return Err(MonitorError::Format {
                reason: format!("array element {} is not an object", pos),
            });
        }

        let imported: Vec<Rule> = serde_json::from_value(value).map_err(|e| {
            MonitorError::Format { reason: format!("array elements are not rules: {}", e) }
        })?;

        let previous = std::mem::replace(&mut self.rules, imported);
        if let Err(e) = self.persist() {
            self.rules = previous;
            return Err(e);
        }

        info!(count = self.rules.len(), "Rules imported");
        Ok(self.rules.len())
    }

    /// Write the export payload to a file, e.g. `arbitrage_rules_2026-08-06.json`.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> MonitorResult<()> {
        let path = path.as_ref();
        let json = self.export_json()?;
        fs::write(path, json)
            .map_err(|e| MonitorError::storage(format!("write {}", path.display()), e))
    }

    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> MonitorResult<usize> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| MonitorError::storage(format!("read {}", path.display()), e))?;
        self.import_json(&raw)
    }

    fn persist(&self) -> MonitorResult<()> {
        let raw = serde_json::to_string(&self.rules)
            .map_err(|e| MonitorError::storage("serialize rules", e))?;
        self.backend.save(RULES_KEY, &raw)
    }
}

fn validate(draft: &RuleDraft) -> MonitorResult<()> {
    if draft.name.trim().is_empty() {
        return Err(MonitorError::validation("name", "rule name is required"));
    }
    if draft.max_order_amount <= dec!(0) {
        return Err(MonitorError::validation(
            "maxOrderAmount",
            format!("must be positive, got {}", draft.max_order_amount),
        ));
    }
    if draft.max_holding_time_hours <= dec!(0) {
        return Err(MonitorError::validation(
            "maxHoldingTime",
            format!("must be positive, got {}", draft.max_holding_time_hours),
        ));
    }
    if draft.min_profit < dec!(0) {
        return Err(MonitorError::validation(
            "minProfit",
            format!("must not be negative, got {}", draft.min_profit),
        ));
    }
    if draft.take_profit_percentage < dec!(0) {
        return Err(MonitorError::validation(
            "takeProfitPercentage",
            format!("must not be negative, got {}", draft.take_profit_percentage),
        ));
    }
    if draft.max_floating_loss < dec!(0) {
        return Err(MonitorError::validation(
            "maxFloatingLoss",
            format!("must not be negative, got {}", draft.max_floating_loss),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::Exchange;
    use rust_decimal::Decimal;

    fn draft(name: &str) -> RuleDraft {
        RuleDraft {
            name: name.to_string(),
            symbol: "ALL".to_string(),
            long_exchange: Exchange::Binance,
            short_exchange: Exchange::Okx,
            min_profit: dec!(0.02),
            max_order_amount: dec!(5000),
            take_profit_percentage: dec!(2.5),
            stop_loss_percentage: dec!(-1.0),
            max_floating_loss: dec!(500),
            max_holding_time_hours: dec!(48),
        }
    }

    fn store() -> RuleStore {
        RuleStore::new(Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn create_then_get_round_trips_the_draft() {
        let mut store = store();
        let rule = store.create(draft("BTC-Conservative")).unwrap();

        assert!(rule.id.starts_with("RULE_"));
        assert_eq!(rule.created_at, rule.updated_at);

        let fetched = store.get(&rule.id).unwrap();
        assert_eq!(fetched.draft(), draft("BTC-Conservative"));
        assert_eq!(fetched.min_profit, dec!(0.02));
        assert_eq!(fetched.max_order_amount, dec!(5000));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn empty_name_is_rejected_and_nothing_is_stored() {
        let mut store = store();
        let err = store.create(draft("   ")).unwrap_err();
        assert!(matches!(err, MonitorError::Validation { field: "name", .. }));
        assert!(store.list().is_empty());
    }

    #[test]
    fn non_positive_numeric_fields_are_rejected() {
        let mut store = store();

        let mut bad = draft("r");
        bad.max_order_amount = Decimal::ZERO;
        assert!(matches!(
            store.create(bad).unwrap_err(),
            MonitorError::Validation { field: "maxOrderAmount", .. }
        ));

        let mut bad = draft("r");
        bad.max_holding_time_hours = dec!(-1);
        assert!(matches!(
            store.create(bad).unwrap_err(),
            MonitorError::Validation { field: "maxHoldingTime", .. }
        ));

        // Stop loss legitimately goes negative
        let mut ok = draft("r");
        ok.stop_loss_percentage = dec!(-3);
        assert!(store.create(ok).is_ok());
    }

    #[test]
    fn update_replaces_fields_and_preserves_identity() {
        let mut store = store();
        let rule = store.create(draft("before")).unwrap();

        let mut edited = draft("after");
        edited.min_profit = dec!(0.5);
        let updated = store.update(&rule.id, edited).unwrap();

        assert_eq!(updated.id, rule.id);
        assert_eq!(updated.created_at, rule.created_at);
        assert_eq!(updated.name, "after");
        assert_eq!(updated.min_profit, dec!(0.5));
        assert!(updated.updated_at >= rule.updated_at);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = store();
        let err = store.update("RULE_missing", draft("r")).unwrap_err();
        assert!(matches!(err, MonitorError::NotFound { .. }));
    }

    #[test]
    fn delete_then_get_returns_none() {
        let mut store = store();
        let rule = store.create(draft("r")).unwrap();

        assert!(store.delete(&rule.id).unwrap());
        assert!(store.get(&rule.id).is_none());
        assert!(!store.delete(&rule.id).unwrap());
    }

    #[test]
    fn rules_survive_a_store_reload() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let id = {
            let mut store = RuleStore::new(backend.clone()).unwrap();
            store.create(draft("persisted")).unwrap().id
        };

        let reloaded = RuleStore::new(backend).unwrap();
        assert_eq!(reloaded.get(&id).unwrap().name, "persisted");
    }

    #[test]
    fn export_import_round_trips_the_list() {
        let mut source = store();
        source.create(draft("one")).unwrap();
        source.create(draft("two")).unwrap();
        let exported = source.export_json().unwrap();

        let mut target = store();
        assert_eq!(target.import_json(&exported).unwrap(), 2);
        assert_eq!(target.list(), source.list());
    }

    #[test]
    fn import_rejects_non_list_payloads() {
        let mut store = store();

        for payload in [r#"{"id":"RULE_1"}"#, "42", r#""rules""#, "[1, 2]"] {
            let err = store.import_json(payload).unwrap_err();
            assert!(matches!(err, MonitorError::Format { .. }), "payload: {}", payload);
        }
        assert!(store.list().is_empty());
    }

    #[test]
    fn import_replaces_existing_rules_wholesale() {
        let mut store = store();
        store.create(draft("stale")).unwrap();

        assert_eq!(store.import_json("[]").unwrap(), 0);
        assert!(store.list().is_empty());
    }

    #[test]
    fn file_export_import_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arbitrage_rules_2026-08-06.json");

        let mut source = store();
        source.create(draft("file-bound")).unwrap();
        source.export_to_file(&path).unwrap();

        let mut target = store();
        assert_eq!(target.import_from_file(&path).unwrap(), 1);
        assert_eq!(target.list(), source.list());
    }
}
