use thiserror::Error;

// === DownloadError ===

/// Errors related to download management operations.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The caller supplied an unusable argument, such as an empty URL.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Download with the given ID was not found.
    #[error("Download not found: {0}")]
    NotFound(String),
    /// The server answered with a non-success status or the connection failed.
    #[error("Download network error: {0}")]
    NetworkError(String),
    /// A file system error occurred.
    #[error("Download file system error: {0}")]
    FileSystemError(String),
    /// The transfer for a registered download failed; the record is marked Failed.
    #[error("Download {id} failed: {source}")]
    DownloadFailed {
        id: String,
        #[source]
        source: Box<DownloadError>,
    },
    /// The transfer was aborted because the download was cancelled.
    #[error("Download cancelled: {0}")]
    Cancelled(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
