//! Adapter facade consumed by the enforcement engine.

use rusqlite::Connection;
use tracing::debug;

use rulestore_filter::{exact_match, translate, window, FilterSpec};

use crate::config::StoreConfig;
use crate::error::Error;
use crate::rule::RuleSet;
use crate::store::RuleStore;

/// The public policy-persistence surface.
///
/// The `filtered` flag is advisory: it tells the enforcement engine that the
/// in-memory rule set may be a strict subset of storage, so a subsequent
/// full [`save_policy`](Self::save_policy) could silently drop rows that
/// were never loaded. Only a full [`load_policy`](Self::load_policy) (or a
/// filtered load with no filter) clears it.
pub struct DatabaseAdapter {
    store: RuleStore,
    filtered: bool,
}

impl DatabaseAdapter {
    /// Open an adapter from configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, Error> {
        Ok(Self {
            store: RuleStore::open(config)?,
            filtered: false,
        })
    }

    /// Open an adapter that starts in the filtered state. Same behavior
    /// everywhere, only the initial flag differs.
    pub fn new_filtered(config: &StoreConfig) -> Result<Self, Error> {
        let mut adapter = Self::new(config)?;
        adapter.filtered = true;
        Ok(adapter)
    }

    /// Wrap an already-opened connection.
    pub fn with_connection(conn: Connection, table: impl Into<String>) -> Self {
        Self {
            store: RuleStore::with_connection(conn, table),
            filtered: false,
        }
    }

    /// Whether the last load was filtered.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Read every rule, canonicalized, in storage order.
    pub fn load_policy(&mut self) -> Result<RuleSet, Error> {
        let rules = self.store.select_all()?;
        self.filtered = false;
        debug!(rules = rules.len(), "loaded full policy");
        Ok(RuleSet::from_rules(rules))
    }

    /// Read the rules matching a filter. `None` behaves exactly like
    /// [`load_policy`](Self::load_policy); a present filter that translates
    /// successfully marks the adapter filtered. A rejected filter leaves
    /// both stored state and the flag untouched.
    pub fn load_filtered_policy(
        &mut self,
        filter: Option<&FilterSpec>,
    ) -> Result<RuleSet, Error> {
        let Some(filter) = filter else {
            return self.load_policy();
        };
        let pred = translate(filter)?;
        let rules = self.store.select_where(&pred)?;
        self.filtered = true;
        debug!(rules = rules.len(), clause = %pred.clause, "loaded filtered policy");
        Ok(RuleSet::from_rules(rules))
    }

    /// Insert one row per rule in every ptype bucket. No pre-clear: callers
    /// wanting replace-all semantics clear the table themselves.
    pub fn save_policy(&mut self, rules: &RuleSet) -> Result<(), Error> {
        for (ptype, bucket) in rules.buckets() {
            self.store.insert_many(ptype, bucket)?;
        }
        debug!(rules = rules.len(), "saved policy");
        Ok(())
    }

    /// Append a single rule.
    pub fn add_policy(&mut self, ptype: &str, rule: &[String]) -> Result<(), Error> {
        self.store.insert_one(ptype, rule)
    }

    /// Append a batch of rules as one multi-row insert.
    pub fn add_policies(&mut self, ptype: &str, rules: &[Vec<String>]) -> Result<(), Error> {
        self.store.insert_many(ptype, rules)
    }

    /// Delete the rows exactly matching ptype and every supplied value
    /// position. A shorter tuple constrains fewer columns.
    pub fn remove_policy(&mut self, ptype: &str, rule: &[String]) -> Result<(), Error> {
        self.store.delete_where(&exact_match(ptype, rule))
    }

    /// Delete one exact match per rule, atomically across the batch.
    pub fn remove_policies(&mut self, ptype: &str, rules: &[Vec<String>]) -> Result<(), Error> {
        self.store.delete_many(ptype, rules)
    }

    /// Field-index windowed delete: value `k` constrains column
    /// `v{field_index + k}`, empty values constrain nothing. Matching zero
    /// rows is success.
    pub fn remove_filtered_policy(
        &mut self,
        ptype: &str,
        field_index: usize,
        field_values: &[String],
    ) -> Result<(), Error> {
        self.store
            .delete_where(&window(ptype, field_index, field_values))
    }

    /// Replace a single rule's value tuple.
    pub fn update_policy(
        &mut self,
        ptype: &str,
        old: &[String],
        new: &[String],
    ) -> Result<(), Error> {
        self.store.update_one(ptype, old, new)
    }

    /// Replace one rule per (old, new) pair, atomically across the batch.
    pub fn update_policies(
        &mut self,
        ptype: &str,
        olds: &[Vec<String>],
        news: &[Vec<String>],
    ) -> Result<(), Error> {
        self.store.update_many(ptype, olds, news)
    }

    /// Replace the rows matching a field-index window with `new_rules`,
    /// returning the replaced tuples so the caller can verify or log the
    /// swap.
    pub fn update_filtered_policies(
        &mut self,
        ptype: &str,
        new_rules: &[Vec<String>],
        field_index: usize,
        field_values: &[String],
    ) -> Result<Vec<Vec<String>>, Error> {
        self.store
            .replace_where(ptype, new_rules, field_index, field_values)
    }
}
