// Buraunza platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for Buraunza.
///
/// - **Linux**: `~/.config/buraunza` (or `$XDG_CONFIG_HOME/buraunza`)
/// - **macOS**: `~/Library/Application Support/Buraunza`
/// - **Windows**: `%APPDATA%/Buraunza`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for Buraunza.
///
/// - **Linux**: `~/.local/share/buraunza` (or `$XDG_DATA_HOME/buraunza`)
/// - **macOS**: `~/Library/Application Support/Buraunza`
/// - **Windows**: `%APPDATA%/Buraunza`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Returns the default directory downloads are saved to.
///
/// Desktop platforms use the user's Downloads folder; when no home directory
/// is known the application data directory is used instead.
pub fn get_downloads_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_downloads_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_downloads_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_downloads_dir()
    }
}
