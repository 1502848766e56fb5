//! Free-form metadata attached to a sample.
//!
//! Carries provenance: participant id, birth date, sex, task id,
//! administrator, creation/write timestamps, protocol and device info.
//! Keys are free-form strings; values arbitrary JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp format used for `created_on` / `updated_on` / `written_on`.
pub const DATE_FORMAT: &str = "%Y-%m-%d, %H:%M:%S";

/// Open-ended metadata mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaData {
    entries: BTreeMap<String, Value>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Merge another mapping into this one. New keys overwrite existing
    /// ones; `updated_on` is stamped on every merge.
    pub fn merge(&mut self, other: &MetaData) {
        self.entries
            .insert("updated_on".to_string(), Value::String(now_stamp()));
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}

/// Current UTC time in the canonical metadata format.
pub fn now_stamp() -> String {
    chrono::Utc::now().format(DATE_FORMAT).to_string()
}
