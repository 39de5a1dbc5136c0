//! Key-value preference storage scoped to the page's origin.
//!
//! Values are strings, the way page-local storage holds them. The SQLite
//! store persists across page loads; the memory store backs tests and
//! hosts started without a data directory.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;

use crate::database::Database;
use crate::types::errors::PreferenceError;

/// Trait defining the preference storage interface.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
    /// Removes a key. Returns whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError>;
}

/// Preference store backed by the `preferences` table.
pub struct SqlitePreferenceStore {
    db: Database,
    origin: String,
}

impl SqlitePreferenceStore {
    pub fn new(db: Database, origin: &str) -> Self {
        Self {
            db,
            origin: origin.to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let result = self.db.connection().query_row(
            "SELECT value FROM preferences WHERE origin = ?1 AND key = ?2",
            params![self.origin, key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.db.connection().execute(
            "INSERT INTO preferences (origin, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(origin, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.origin, key, value, Self::now()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError> {
        let affected = self.db.connection().execute(
            "DELETE FROM preferences WHERE origin = ?1 AND key = ?2",
            params![self.origin, key],
        )?;
        Ok(affected > 0)
    }
}

/// Non-persistent preference store.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError> {
        Ok(self.values.remove(key).is_some())
    }
}
