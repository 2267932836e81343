//! Per-sitting staging: search filter, selection, manual overrides.
//!
//! The surrounding shell owns one `Session` per user sitting. Core
//! computations stay pure by taking record snapshots with overrides
//! already applied; nothing in here touches the store, and overrides
//! are never persisted.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::DrugRecord;
use crate::usage::estimate_usage;

/// Default result cap for a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 1000;

/// Which text field an active search targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchField {
    /// Match against the active ingredient label
    Ingredient,
    /// Match against the actual manufacturer
    Manufacturer,
}

/// An active search filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchFilter {
    /// Field the term applies to
    pub field: SearchField,
    /// Case-insensitive substring to match
    pub term: String,
    /// Result cap
    pub limit: usize,
}

impl SearchFilter {
    /// Create a filter with the default result cap.
    pub fn new(field: SearchField, term: String) -> Self {
        Self { field, term, limit: DEFAULT_SEARCH_LIMIT }
    }
}

/// Manual figures attached to one record for the sitting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ManualOverride {
    /// Replaces the quantity-produced term of the estimate
    pub production: Option<f64>,
    /// Replaces the estimate outright
    pub usage: Option<f64>,
}

impl ManualOverride {
    /// True when neither figure is set.
    pub fn is_empty(&self) -> bool {
        self.production.is_none() && self.usage.is_none()
    }
}

/// Mutable per-sitting state.
///
/// Selection and overrides are keyed by record id, so they survive
/// re-running the same search. Changing the filter clears the
/// selection (it referred to the previous result set) but keeps
/// overrides, which stay meaningful for the records they name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique session ID
    pub session_id: String,
    /// Active search filter, if any
    pub filter: Option<SearchFilter>,
    /// Selected record ids
    selected: HashSet<i64>,
    /// Manual overrides keyed by record id
    overrides: HashMap<i64, ManualOverride>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            filter: None,
            selected: HashSet::new(),
            overrides: HashMap::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace the active filter, clearing the selection made against
    /// the previous result set.
    pub fn set_filter(&mut self, filter: SearchFilter) {
        self.filter = Some(filter);
        self.selected.clear();
        self.touch();
    }

    /// Toggle one record's selection; returns the new state.
    pub fn toggle_selected(&mut self, id: i64) -> bool {
        let now_selected = if self.selected.contains(&id) {
            self.selected.remove(&id);
            false
        } else {
            self.selected.insert(id);
            true
        };
        self.touch();
        now_selected
    }

    /// Select every record in the snapshot, or clear the selection
    /// when all of them are already selected.
    pub fn toggle_select_all(&mut self, records: &[DrugRecord]) {
        if self.selected.len() == records.len() {
            self.selected.clear();
        } else {
            self.selected = records.iter().map(|record| record.id).collect();
        }
        self.touch();
    }

    /// Drop the whole selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.touch();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Set or clear the manual usage override for a record.
    pub fn set_manual_usage(&mut self, id: i64, usage: Option<f64>) {
        self.overrides.entry(id).or_default().usage = usage;
        self.prune(id);
        self.touch();
    }

    /// Set or clear the manual production override for a record.
    pub fn set_manual_production(&mut self, id: i64, production: Option<f64>) {
        self.overrides.entry(id).or_default().production = production;
        self.prune(id);
        self.touch();
    }

    /// Drop both overrides for a record.
    pub fn clear_overrides(&mut self, id: i64) {
        self.overrides.remove(&id);
        self.touch();
    }

    /// Override attached to a record, if any.
    pub fn override_for(&self, id: i64) -> Option<&ManualOverride> {
        self.overrides.get(&id)
    }

    /// Copy a record with this session's overrides injected. Records
    /// without an override pass through unchanged.
    pub fn with_overrides(&self, record: &DrugRecord) -> DrugRecord {
        let mut out = record.clone();
        if let Some(manual) = self.overrides.get(&record.id) {
            out.manual_production = manual.production;
            out.manual_usage = manual.usage;
        }
        out
    }

    /// Apply overrides across a snapshot, preserving order.
    pub fn apply_overrides(&self, records: &[DrugRecord]) -> Vec<DrugRecord> {
        records.iter().map(|record| self.with_overrides(record)).collect()
    }

    /// Selected records from a snapshot, overrides applied, snapshot
    /// order preserved.
    pub fn selected_records(&self, records: &[DrugRecord]) -> Vec<DrugRecord> {
        records
            .iter()
            .filter(|record| self.selected.contains(&record.id))
            .map(|record| self.with_overrides(record))
            .collect()
    }

    /// Total estimated usage over the selected records, in kilograms.
    pub fn total_selected_usage(&self, records: &[DrugRecord]) -> f64 {
        records
            .iter()
            .filter(|record| self.selected.contains(&record.id))
            .map(|record| estimate_usage(&self.with_overrides(record)).kilograms())
            .sum()
    }

    fn prune(&mut self, id: i64) {
        if self.overrides.get(&id).is_some_and(|manual| manual.is_empty()) {
            self.overrides.remove(&id);
        }
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
