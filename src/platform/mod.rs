//! Per-OS locations for the host's settings file and preference database.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as os;

pub const APP_DIR: &str = "readassist";

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

/// Directory holding the preference database.
pub fn get_data_dir() -> PathBuf {
    os::get_data_dir()
}

/// Default location of the preference database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("preferences.db")
}
