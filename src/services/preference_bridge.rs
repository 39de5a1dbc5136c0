//! Persists the site-chrome visibility flag and migrates the legacy key.
//!
//! The store holds the flag as the strings `"true"` and `"false"`. An
//! absent key means "not hidden".

use log::{debug, info};

use crate::types::errors::PreferenceError;
use crate::types::settings::StorageKeys;

use super::preference_store::PreferenceStore;

pub struct PreferenceBridge {
    keys: StorageKeys,
}

impl PreferenceBridge {
    pub fn new(keys: StorageKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// True only when the stored value is exactly `"true"`.
    pub fn is_chrome_hidden(&self, store: &dyn PreferenceStore) -> Result<bool, PreferenceError> {
        Ok(store.get(&self.keys.chrome_hidden)?.as_deref() == Some("true"))
    }

    pub fn set_chrome_hidden(
        &self,
        store: &mut dyn PreferenceStore,
        hidden: bool,
    ) -> Result<(), PreferenceError> {
        store.set(&self.keys.chrome_hidden, if hidden { "true" } else { "false" })
    }

    /// Forgets the flag entirely.
    pub fn clear(&self, store: &mut dyn PreferenceStore) -> Result<(), PreferenceError> {
        store.remove(&self.keys.chrome_hidden)?;
        Ok(())
    }

    /// A legacy flag of exactly `"true"` is written under the current key,
    /// overriding whatever is stored there, and the legacy key is deleted.
    /// Any other legacy value is left in place. Returns whether anything moved.
    pub fn migrate_legacy(&self, store: &mut dyn PreferenceStore) -> Result<bool, PreferenceError> {
        let legacy_key = match &self.keys.legacy_chrome_hidden {
            Some(key) => key,
            None => return Ok(false),
        };
        match store.get(legacy_key)?.as_deref() {
            Some("true") => {}
            Some(other) => {
                debug!("legacy preference {} is {:?}, not migrating", legacy_key, other);
                return Ok(false);
            }
            None => return Ok(false),
        }
        store.set(&self.keys.chrome_hidden, "true")?;
        store.remove(legacy_key)?;
        info!("migrated preference {} -> {}", legacy_key, self.keys.chrome_hidden);
        Ok(true)
    }
}
