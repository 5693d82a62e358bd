use buraunza::types::errors::*;

// === DownloadError Tests ===

#[test]
fn download_error_display_variants() {
    assert_eq!(
        DownloadError::InvalidArgument("URL must not be empty".to_string()).to_string(),
        "Invalid argument: URL must not be empty"
    );
    assert_eq!(
        DownloadError::NotFound("dl-1".to_string()).to_string(),
        "Download not found: dl-1"
    );
    assert_eq!(
        DownloadError::NetworkError("connection refused".to_string()).to_string(),
        "Download network error: connection refused"
    );
    assert_eq!(
        DownloadError::FileSystemError("disk full".to_string()).to_string(),
        "Download file system error: disk full"
    );
    assert_eq!(
        DownloadError::Cancelled("dl-2".to_string()).to_string(),
        "Download cancelled: dl-2"
    );
}

#[test]
fn download_failed_wraps_cause() {
    let err = DownloadError::DownloadFailed {
        id: "dl-3".to_string(),
        source: Box::new(DownloadError::NetworkError(
            "Server responded with HTTP 404 Not Found".to_string(),
        )),
    };
    assert_eq!(
        err.to_string(),
        "Download dl-3 failed: Download network error: Server responded with HTTP 404 Not Found"
    );

    let source = std::error::Error::source(&err).expect("DownloadFailed must expose its cause");
    assert_eq!(
        source.to_string(),
        "Download network error: Server responded with HTTP 404 Not Found"
    );
}

#[test]
fn download_error_leaf_variants_have_no_source() {
    let err: Box<dyn std::error::Error> = Box::new(DownloadError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::SerializationError("trailing comma".to_string()).to_string(),
        "Settings serialization error: trailing comma"
    );
    assert_eq!(
        SettingsError::InvalidKey("downloads.foo".to_string()).to_string(),
        "Invalid settings key: downloads.foo"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected bool".to_string()).to_string(),
        "Invalid settings value: expected bool"
    );
}
