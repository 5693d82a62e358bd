// Buraunza Settings Engine
// Manages user settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::managers::download_manager::DownloadDirectorySource;
use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::BrowserSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BrowserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BrowserSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BrowserSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: BrowserSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<BrowserSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            tracing::debug!(path = %self.config_path, "no settings file, using defaults");
            self.settings = BrowserSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: BrowserSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file, creating parent
    /// directories as needed.
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
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Updates an individual setting by dot-notation key path, then saves.
    ///
    /// The new value is validated by deserializing the whole settings tree, so
    /// a wrongly-typed value leaves the current settings untouched.
    ///
    /// # Examples
    /// - `"general.homepage"` → updates `settings.general.homepage`
    /// - `"downloads.download_directory"` → updates the preferred download directory
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let parts: Vec<&str> = key.split('.').collect();

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        {
            let mut current = &mut json_value;
            for (i, part) in parts.iter().enumerate() {
                if i == parts.len() - 1 {
                    match current {
                        serde_json::Value::Object(map) => {
                            if !map.contains_key(*part) {
                                return Err(SettingsError::InvalidKey(format!(
                                    "Key '{}' not found in settings",
                                    key
                                )));
                            }
                            map.insert(part.to_string(), value.clone());
                        }
                        _ => {
                            return Err(SettingsError::InvalidKey(format!(
                                "Cannot navigate to key '{}': intermediate value is not an object",
                                key
                            )));
                        }
                    }
                } else {
                    current = match current.get_mut(*part) {
                        Some(v) => v,
                        None => {
                            return Err(SettingsError::InvalidKey(format!(
                                "Key '{}' not found in settings",
                                key
                            )));
                        }
                    };
                }
            }
        }

        let new_settings: BrowserSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.settings = new_settings;
        self.save()?;

        tracing::debug!(key, "setting updated");
        Ok(())
    }

    /// Resets all settings to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BrowserSettings::default();
        self.save()?;
        Ok(())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

/// Lets a shared settings engine act as the download manager's directory lookup.
impl DownloadDirectorySource for RwLock<SettingsEngine> {
    fn preferred_download_directory(&self) -> String {
        match self.read() {
            Ok(engine) => engine.get_settings().downloads.download_directory.clone(),
            Err(poisoned) => poisoned
                .into_inner()
                .get_settings()
                .downloads
                .download_directory
                .clone(),
        }
    }
}
