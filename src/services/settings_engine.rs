//! Enhancer settings: site profile, storage keys and voice, stored as JSON
//! at `<config dir>/settings.json` unless a path is given.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::EnhancerSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<EnhancerSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &EnhancerSettings;
    /// Sets one value by dot path, e.g. `speech.rate` or `site.content_region_ids`.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

pub struct SettingsEngine {
    config_path: String,
    settings: EnhancerSettings,
}

impl SettingsEngine {
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });
        Self {
            config_path,
            settings: EnhancerSettings::default(),
        }
    }
}

/// Replaces the leaf at `parts` inside `root`. Only existing keys may be set.
fn set_path(root: &mut Value, parts: &[&str], value: Value, key: &str) -> Result<(), SettingsError> {
    let not_found = || SettingsError::InvalidKey(format!("Key '{}' not found in settings", key));
    let (leaf, parents) = parts.split_last().ok_or_else(not_found)?;
    let mut current = root;
    for part in parents {
        current = current.get_mut(*part).ok_or_else(not_found)?;
    }
    match current {
        Value::Object(map) if map.contains_key(*leaf) => {
            map.insert(leaf.to_string(), value);
            Ok(())
        }
        Value::Object(_) => Err(not_found()),
        _ => Err(SettingsError::InvalidKey(format!(
            "Cannot navigate to key '{}': intermediate value is not an object",
            key
        ))),
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// A missing file yields defaults; a malformed one is an error.
    fn load(&mut self) -> Result<EnhancerSettings, SettingsError> {
        let path = Path::new(&self.config_path);
        if !path.exists() {
            info!("no settings at {}, using defaults", self.config_path);
            self.settings = EnhancerSettings::default();
            return Ok(self.settings.clone());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;
        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &EnhancerSettings {
        &self.settings
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.trim().is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }
        let parts: Vec<&str> = key.split('.').collect();
        let mut json = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        set_path(&mut json, &parts, value, key)?;
        self.settings = serde_json::from_value(json).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        warn!("resetting settings at {}", self.config_path);
        self.settings = EnhancerSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
