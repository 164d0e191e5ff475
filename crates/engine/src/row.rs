//! Row identity and field storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Stable row identity. Monotonically assigned, never reused after
/// materialization, and independent of display position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl RowId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One materialized row: a stable identity plus a uniform field map shared by
/// base and dynamic columns alike. Absent entries read as empty string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    fields: FxHashMap<String, String>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            fields: FxHashMap::default(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set a field. Empty values remove the entry, keeping the map sparse.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.fields.remove(&key);
        } else {
            self.fields.insert(key, value);
        }
    }

    /// Builder-style `set`, for seeding.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Number of non-empty fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
