// Buraunza platform paths for Windows
// Config:    %APPDATA%/Buraunza
// Data:      %APPDATA%/Buraunza
// Downloads: %USERPROFILE%/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Buraunza on Windows.
/// `%APPDATA%/Buraunza`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("Buraunza")
}

/// Returns the data directory for Buraunza on Windows.
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

/// Returns the user's downloads directory on Windows.
/// `%USERPROFILE%/Downloads`, or the data directory if no profile is set.
pub fn get_downloads_dir() -> PathBuf {
    match env::var("USERPROFILE") {
        Ok(profile) if !profile.is_empty() => PathBuf::from(profile).join("Downloads"),
        _ => get_data_dir().join("downloads"),
    }
}
