// Buraunza platform paths for macOS
// Config:    ~/Library/Application Support/Buraunza
// Data:      ~/Library/Application Support/Buraunza
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for Buraunza on macOS.
/// `~/Library/Application Support/Buraunza`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Buraunza")
}

/// Returns the data directory for Buraunza on macOS.
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

/// Returns the user's downloads directory on macOS.
/// `~/Downloads`
pub fn get_downloads_dir() -> PathBuf {
    home_dir().join("Downloads")
}
