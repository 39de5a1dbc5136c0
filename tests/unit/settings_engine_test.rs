//! Unit tests for the settings engine: load, save, dot-path updates, reset.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use readassist::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use readassist::types::errors::SettingsError;
use readassist::types::settings::{EnhancerSettings, SiteProfile};

fn engine_in(tmp: &TempDir) -> SettingsEngine {
    let path = tmp.path().join("settings.json").to_string_lossy().to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_file() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let settings = engine.load().unwrap();
    assert_eq!(settings, EnhancerSettings::default());
    assert_eq!(settings.site.name, "wikipedia");
    assert_eq!(settings.storage.chrome_hidden, "tamWikiHideControls");
    assert_eq!(settings.speech.lang, "en-US");
}

#[test]
fn test_set_value_persists() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    engine.load().unwrap();
    engine.set_value("speech.rate", json!(1.25)).unwrap();
    engine
        .set_value("site.content_region_ids", json!(["bodyContent"]))
        .unwrap();

    let mut reloaded = engine_in(&tmp);
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.speech.rate, 1.25);
    assert_eq!(settings.site.content_region_ids, vec!["bodyContent".to_string()]);
}

#[test]
fn test_set_value_rejects_unknown_and_empty_keys() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    assert!(matches!(engine.set_value("", json!(1)), Err(SettingsError::InvalidKey(_))));
    assert!(matches!(
        engine.set_value("speech.volume", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("speech.rate.fast", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let err = engine.set_value("speech.rate", json!("fast")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().speech.rate, 1.0);
}

#[test]
fn test_malformed_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("settings.json"), "{not json").unwrap();
    let mut engine = engine_in(&tmp);
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_reset_restores_defaults() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    engine.set_value("site", serde_json::to_value(SiteProfile::generic()).unwrap()).unwrap();
    assert_eq!(engine.get_settings().site.name, "generic");
    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &EnhancerSettings::default());
    let mut reloaded = engine_in(&tmp);
    assert_eq!(reloaded.load().unwrap(), EnhancerSettings::default());
}

#[test]
fn test_legacy_key_may_be_omitted_in_file() {
    let tmp = TempDir::new().unwrap();
    let mut json = serde_json::to_value(EnhancerSettings::default()).unwrap();
    json["storage"].as_object_mut().unwrap().remove("legacy_chrome_hidden");
    fs::write(tmp.path().join("settings.json"), json.to_string()).unwrap();
    let mut engine = engine_in(&tmp);
    assert_eq!(engine.load().unwrap().storage.legacy_chrome_hidden, None);
}
