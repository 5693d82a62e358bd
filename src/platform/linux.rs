// Buraunza platform paths for Linux
// Config:    ~/.config/buraunza
// Data:      ~/.local/share/buraunza
// Downloads: $XDG_DOWNLOAD_DIR or ~/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Buraunza on Linux.
/// Uses `$XDG_CONFIG_HOME/buraunza` if set, otherwise `~/.config/buraunza`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("buraunza")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("buraunza")
    }
}

/// Returns the data directory for Buraunza on Linux.
/// Uses `$XDG_DATA_HOME/buraunza` if set, otherwise `~/.local/share/buraunza`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("buraunza")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("buraunza")
    }
}

/// Returns the user's downloads directory on Linux.
pub fn get_downloads_dir() -> PathBuf {
    downloads_dir_from(
        env::var("XDG_DOWNLOAD_DIR").ok(),
        env::var("HOME").ok(),
    )
}

/// Without a home directory the application data directory is used instead.
fn downloads_dir_from(xdg_download: Option<String>, home: Option<String>) -> PathBuf {
    match (xdg_download, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join("Downloads"),
        _ => get_data_dir().join("downloads"),
    }
}
