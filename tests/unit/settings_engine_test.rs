//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, and reset behavior.

use buraunza::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use buraunza::types::errors::SettingsError;
use buraunza::types::settings::{BrowserSettings, StartupBehavior};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, BrowserSettings::default());
    assert!(settings.downloads.download_directory.is_empty());
    assert!(settings.downloads.ask_before_download);
    assert!(!settings.downloads.auto_open_completed);
}

/// A change made through `set_value` is visible to a fresh engine reading the same file.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value(
                "downloads.download_directory",
                serde_json::Value::String("/home/me/Incoming".to_string()),
            )
            .unwrap();
    }

    let mut engine2 = engine_in_temp(&dir);
    let loaded = engine2.load().unwrap();
    assert_eq!(loaded.downloads.download_directory, "/home/me/Incoming");
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("general.startup_behavior", serde_json::json!("Restore"))
            .unwrap();
        engine
            .set_value("downloads.auto_open_completed", serde_json::json!(true))
            .unwrap();
        assert_eq!(
            engine.get_settings().general.startup_behavior,
            StartupBehavior::Restore
        );

        engine.reset().unwrap();
        assert_eq!(*engine.get_settings(), BrowserSettings::default());
    }

    let mut engine2 = engine_in_temp(&dir);
    assert_eq!(engine2.load().unwrap(), BrowserSettings::default());
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("downloads.ask_before_download", serde_json::json!("yes"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert!(engine.get_settings().downloads.ask_before_download);
}

#[test]
fn test_set_value_rejects_unknown_and_empty_keys() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    assert!(matches!(
        engine.set_value("downloads.nonexistent", serde_json::json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("", serde_json::json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_load_malformed_json_is_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ invalid json }").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}
