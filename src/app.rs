//! App Core for Buraunza.
//!
//! Central struct holding the settings engine and the download manager,
//! constructed once at startup and passed by reference to the UI layer.

use std::sync::{Arc, RwLock};

use crate::managers::download_manager::{DownloadManager, DownloadManagerConfig};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::SettingsError;

/// Central application struct holding all managers and services.
pub struct App {
    pub settings_engine: Arc<RwLock<SettingsEngine>>,
    pub download_manager: DownloadManager,
}

impl App {
    /// Creates a new App, loading settings from `config_path` (or the platform
    /// default path) and wiring them into the download manager.
    ///
    /// An unreadable settings file is logged and replaced by defaults so the
    /// browser can still start.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        if let Err(e) = settings_engine.load() {
            tracing::warn!(
                path = settings_engine.get_config_path(),
                error = %e,
                "failed to load settings, using defaults"
            );
        }
        let settings_engine = Arc::new(RwLock::new(settings_engine));

        let download_manager =
            DownloadManager::new(settings_engine.clone(), DownloadManagerConfig::default())?;

        Ok(Self {
            settings_engine,
            download_manager,
        })
    }

    /// Stores `directory` as the preferred download directory and saves settings.
    pub fn set_download_directory(&self, directory: &str) -> Result<(), SettingsError> {
        let mut engine = self
            .settings_engine
            .write()
            .map_err(|e| SettingsError::IoError(format!("Settings lock poisoned: {}", e)))?;
        engine.set_value(
            "downloads.download_directory",
            serde_json::Value::String(directory.to_string()),
        )
    }
}
