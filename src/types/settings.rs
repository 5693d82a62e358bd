use serde::{Deserialize, Serialize};

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub downloads: DownloadSettings,
}

/// General browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub homepage: String,
    pub default_search_engine: String,
    pub startup_behavior: StartupBehavior,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            homepage: "local://default.html".to_string(),
            default_search_engine: "bing".to_string(),
            startup_behavior: StartupBehavior::Homepage,
        }
    }
}

/// What the browser does on startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StartupBehavior {
    Homepage,
    NewTab,
    Restore,
}

/// Download-related preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadSettings {
    /// Preferred target directory. Empty means "use the platform default".
    pub download_directory: String,
    #[serde(default = "default_true")]
    pub ask_before_download: bool,
    #[serde(default)]
    pub auto_open_completed: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            download_directory: String::new(),
            ask_before_download: true,
            auto_open_completed: false,
        }
    }
}
