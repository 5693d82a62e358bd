//! Unit tests for the DownloadManager public API that need no network.
//!
//! Covers directory resolution, collision-free naming against real files,
//! argument validation and the runtime requirement of `start_download`.

use std::path::PathBuf;
use std::sync::Arc;

use buraunza::managers::download_manager::{
    unique_file_name, DownloadDirectorySource, DownloadManager, DownloadManagerConfig,
    DownloadManagerTrait, NoPreference,
};
use buraunza::platform;
use buraunza::types::errors::DownloadError;
use rstest::rstest;
use tempfile::TempDir;

struct Preferred(String);

impl DownloadDirectorySource for Preferred {
    fn preferred_download_directory(&self) -> String {
        self.0.clone()
    }
}

fn manager_with(source: impl DownloadDirectorySource + 'static) -> DownloadManager {
    DownloadManager::new(Arc::new(source), DownloadManagerConfig::default())
        .expect("Failed to build download manager")
}

#[test]
fn test_resolve_uses_existing_preferred_directory() {
    let dir = TempDir::new().unwrap();
    let mgr = manager_with(Preferred(dir.path().to_string_lossy().to_string()));
    assert_eq!(mgr.resolve_download_directory(), dir.path());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("/definitely/not/a/real/dir/buraunza")]
fn test_resolve_falls_back_to_platform_default(#[case] preferred: &str) {
    let mgr = manager_with(Preferred(preferred.to_string()));
    assert_eq!(mgr.resolve_download_directory(), platform::get_downloads_dir());
}

#[test]
fn test_resolve_ignores_preferred_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("not-a-dir.txt");
    std::fs::write(&file, b"x").unwrap();

    let mgr = manager_with(Preferred(file.to_string_lossy().to_string()));
    assert_eq!(mgr.resolve_download_directory(), platform::get_downloads_dir());
}

#[test]
fn test_resolve_without_preference_is_never_empty() {
    let mgr = manager_with(NoPreference);
    assert!(!mgr.resolve_download_directory().as_os_str().is_empty());
}

#[test]
fn test_unique_file_name_free_name_unchanged() {
    let dir = TempDir::new().unwrap();
    assert_eq!(unique_file_name(dir.path(), "report.txt"), "report.txt");
}

#[test]
fn test_unique_file_name_probes_suffixes() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("report.txt"), b"").unwrap();
    assert_eq!(unique_file_name(dir.path(), "report.txt"), "report (1).txt");

    std::fs::write(dir.path().join("report (1).txt"), b"").unwrap();
    assert_eq!(unique_file_name(dir.path(), "report.txt"), "report (2).txt");
}

#[test]
fn test_unique_file_name_fills_first_gap() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.bin"), b"").unwrap();
    std::fs::write(dir.path().join("a (2).bin"), b"").unwrap();
    assert_eq!(unique_file_name(dir.path(), "a.bin"), "a (1).bin");
}

#[tokio::test]
async fn test_download_file_rejects_empty_url() {
    let dir = TempDir::new().unwrap();
    let mgr = manager_with(NoPreference);

    let result = mgr.download_file("", Some(dir.path())).await;
    assert!(matches!(result, Err(DownloadError::InvalidArgument(_))));
    assert!(mgr.list_downloads().is_empty());
}

#[tokio::test]
async fn test_download_file_reports_uncreatable_directory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file in the way").unwrap();
    let target: PathBuf = blocker.join("sub");

    let mgr = manager_with(NoPreference);
    let result = mgr
        .download_file("https://example.com/a.txt", Some(&target))
        .await;
    assert!(matches!(result, Err(DownloadError::FileSystemError(_))));
    assert!(mgr.list_downloads().is_empty());
}

#[test]
fn test_start_download_requires_runtime() {
    let dir = TempDir::new().unwrap();
    let mgr = manager_with(NoPreference);

    let result = mgr.start_download("https://example.com/a.txt", Some(dir.path()));
    assert!(matches!(result, Err(DownloadError::InvalidArgument(_))));
    assert!(mgr.list_downloads().is_empty());
}

#[test]
fn test_get_unknown_download_is_none() {
    let mgr = manager_with(NoPreference);
    assert!(mgr.get_download("nope").is_none());
}

