//! Download Manager for Buraunza.
//!
//! Fetches remote resources over HTTP into uniquely-named files, keeping an
//! ordered list of download records and broadcasting progress and completion
//! events as immutable snapshots.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bytes::BytesMut;
use chrono::Utc;
use futures::StreamExt;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::platform;
use crate::types::download::{DownloadItem, DownloadStatus};
use crate::types::errors::DownloadError;

pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_EVENT_CAPACITY: usize = 4096;
pub const FALLBACK_FILE_NAME: &str = "download.bin";

/// Read-only lookup of the user's preferred download directory.
///
/// An empty string means "no preference".
pub trait DownloadDirectorySource: Send + Sync {
    fn preferred_download_directory(&self) -> String;
}

/// A source with no preference, so resolution always uses the platform default.
pub struct NoPreference;

impl DownloadDirectorySource for NoPreference {
    fn preferred_download_directory(&self) -> String {
        String::new()
    }
}

/// Tunables for the transfer routine.
#[derive(Debug, Clone)]
pub struct DownloadManagerConfig {
    /// Bytes written (and reported) per progress step.
    pub chunk_size: usize,
    /// Whole-request timeout, covering both headers and body.
    pub request_timeout: Duration,
    /// Buffered events per channel before slow subscribers start lagging.
    pub event_capacity: usize,
    pub fallback_file_name: String,
}

impl Default for DownloadManagerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            fallback_file_name: FALLBACK_FILE_NAME.to_string(),
        }
    }
}

/// Trait defining download management operations.
///
/// The transfer itself is the async [`DownloadManager::download_file`].
pub trait DownloadManagerTrait {
    fn start_download(&self, url: &str, directory: Option<&Path>) -> Result<String, DownloadError>;
    fn cancel_download(&self, id: &str) -> Result<(), DownloadError>;
    fn clear_completed(&self);
    fn list_downloads(&self) -> Vec<DownloadItem>;
    fn get_download(&self, id: &str) -> Option<DownloadItem>;
    fn resolve_download_directory(&self) -> PathBuf;
}

/// Live record of one download. Every mutation and the event announcing it
/// happen under `item`'s lock.
struct DownloadEntry {
    id: String,
    item: Mutex<DownloadItem>,
    cancel: CancellationToken,
}

impl DownloadEntry {
    fn new(item: DownloadItem) -> Self {
        Self {
            id: item.id.clone(),
            item: Mutex::new(item),
            cancel: CancellationToken::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DownloadItem> {
        self.item.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn snapshot(&self) -> DownloadItem {
        self.lock().clone()
    }
}

struct Shared {
    downloads: Mutex<Vec<Arc<DownloadEntry>>>,
    progress_tx: broadcast::Sender<DownloadItem>,
    completed_tx: broadcast::Sender<DownloadItem>,
    client: reqwest::Client,
    settings: Arc<dyn DownloadDirectorySource>,
    config: DownloadManagerConfig,
}

/// Handle to the download registry. Clones share the same list and channels.
#[derive(Clone)]
pub struct DownloadManager {
    shared: Arc<Shared>,
}

impl DownloadManager {
    pub fn new(
        settings: Arc<dyn DownloadDirectorySource>,
        config: DownloadManagerConfig,
    ) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DownloadError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        let capacity = config.event_capacity.max(1);
        let (progress_tx, _) = broadcast::channel(capacity);
        let (completed_tx, _) = broadcast::channel(capacity);

        Ok(Self {
            shared: Arc::new(Shared {
                downloads: Mutex::new(Vec::new()),
                progress_tx,
                completed_tx,
                client,
                settings,
                config,
            }),
        })
    }

    /// Subscribes to progress-changed events, one per state change or chunk written.
    pub fn subscribe_progress(&self) -> broadcast::Receiver<DownloadItem> {
        self.shared.progress_tx.subscribe()
    }

    /// Subscribes to completed events, exactly one per download reaching a terminal status.
    pub fn subscribe_completed(&self) -> broadcast::Receiver<DownloadItem> {
        self.shared.completed_tx.subscribe()
    }

    /// Downloads `url` into `directory` (or the resolved default directory).
    ///
    /// Returns the final snapshot of the record on success. Failures after the
    /// record is registered are reported as [`DownloadError::DownloadFailed`]
    /// once the partial file has been removed and the completed event sent.
    pub async fn download_file(
        &self,
        url: &str,
        directory: Option<&Path>,
    ) -> Result<DownloadItem, DownloadError> {
        let url = checked_url(url)?;
        let manager = self.clone();
        let requested = directory.map(Path::to_path_buf);
        let directory = tokio::task::spawn_blocking(move || {
            prepare_directory(requested.unwrap_or_else(|| manager.resolve_download_directory()))
        })
        .await
        .map_err(|e| {
            DownloadError::FileSystemError(format!("Download directory preparation failed: {}", e))
        })??;

        let entry = self.reserve(url, &directory);
        self.run(entry).await
    }

    fn lock_downloads(&self) -> MutexGuard<'_, Vec<Arc<DownloadEntry>>> {
        self.shared.downloads.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn find(&self, id: &str) -> Option<Arc<DownloadEntry>> {
        self.lock_downloads().iter().find(|e| e.id == id).cloned()
    }

    /// Validates the request, prepares the directory and appends a Pending record.
    ///
    /// Blocking variant for callers outside an async context.
    fn register(&self, url: &str, directory: Option<&Path>) -> Result<Arc<DownloadEntry>, DownloadError> {
        let url = checked_url(url)?;
        let directory = match directory {
            Some(dir) => dir.to_path_buf(),
            None => self.resolve_download_directory(),
        };
        let directory = prepare_directory(directory)?;
        Ok(self.reserve(url, &directory))
    }

    /// Picks a free destination in `directory` and appends a Pending record.
    ///
    /// Naming and registration share the registry lock, so two downloads of the
    /// same name never pick the same path.
    fn reserve(&self, url: &str, directory: &Path) -> Arc<DownloadEntry> {
        let desired = file_name_from_url(url, &self.shared.config.fallback_file_name);

        let mut downloads = self.lock_downloads();
        let reserved: Vec<PathBuf> = downloads
            .iter()
            .filter_map(|entry| {
                let item = entry.lock();
                (!item.status.is_terminal()).then(|| item.destination_path.clone())
            })
            .collect();
        let file_name = pick_free_name(&desired, |candidate| {
            let path = directory.join(candidate);
            path.exists() || reserved.contains(&path)
        });
        let destination_path = directory.join(&file_name);

        let item = DownloadItem::new(
            Uuid::new_v4().to_string(),
            url.to_string(),
            file_name,
            destination_path,
        );
        let entry = Arc::new(DownloadEntry::new(item));
        downloads.push(entry.clone());

        tracing::info!(
            id = %entry.id,
            url,
            path = %entry.lock().destination_path.display(),
            "download registered"
        );
        entry
    }

    async fn run(&self, entry: Arc<DownloadEntry>) -> Result<DownloadItem, DownloadError> {
        self.begin(&entry);

        let path = entry.lock().destination_path.clone();
        let mut created = false;
        let outcome = self.transfer(&entry, &mut created).await;

        match outcome {
            Ok(bytes) => {
                if self.finish(&entry, DownloadStatus::Completed, None) {
                    tracing::info!(id = %entry.id, bytes, "download completed");
                    return Ok(entry.snapshot());
                }
                remove_partial_file(&path, created).await;
                Err(DownloadError::Cancelled(entry.id.clone()))
            }
            Err(DownloadError::Cancelled(id)) => {
                remove_partial_file(&path, created).await;
                tracing::info!(id = %id, "download cancelled");
                Err(DownloadError::Cancelled(id))
            }
            Err(err) => {
                remove_partial_file(&path, created).await;
                if self.finish(&entry, DownloadStatus::Failed, Some(err.to_string())) {
                    tracing::warn!(id = %entry.id, error = %err, "download failed");
                    Err(DownloadError::DownloadFailed {
                        id: entry.id.clone(),
                        source: Box::new(err),
                    })
                } else {
                    Err(DownloadError::Cancelled(entry.id.clone()))
                }
            }
        }
    }

    /// Fetches the body into the destination file. Returns the bytes written.
    ///
    /// `created` is set once the destination file exists, so the caller only
    /// removes files this transfer made.
    async fn transfer(&self, entry: &DownloadEntry, created: &mut bool) -> Result<u64, DownloadError> {
        let (url, path) = {
            let item = entry.lock();
            (item.url.clone(), item.destination_path.clone())
        };

        let response = tokio::select! {
            _ = entry.cancel.cancelled() => return Err(DownloadError::Cancelled(entry.id.clone())),
            response = self.shared.client.get(&url).send() => response.map_err(|e| {
                DownloadError::NetworkError(format!("Request to {} failed: {}", url, e))
            })?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::NetworkError(format!(
                "Server responded with HTTP {}",
                status
            )));
        }

        let total = response.content_length();
        self.set_total(entry, total);
        tracing::debug!(id = %entry.id, total = ?total, "response headers received");

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                DownloadError::FileSystemError(format!("Failed to create {}: {}", path.display(), e))
            })?;
        *created = true;

        let chunk_size = self.shared.config.chunk_size.max(1);
        let mut stream = response.bytes_stream();
        let mut pending = BytesMut::with_capacity(chunk_size);
        let mut downloaded: u64 = 0;

        loop {
            let next = tokio::select! {
                _ = entry.cancel.cancelled() => return Err(DownloadError::Cancelled(entry.id.clone())),
                next = stream.next() => next,
            };

            match next {
                Some(Ok(bytes)) => {
                    pending.extend_from_slice(&bytes);
                    while pending.len() >= chunk_size {
                        let chunk = pending.split_to(chunk_size);
                        downloaded = self
                            .write_chunk(entry, &mut file, &path, &chunk, downloaded)
                            .await?;
                    }
                }
                Some(Err(e)) => {
                    return Err(DownloadError::NetworkError(format!(
                        "Failed while reading response body: {}",
                        e
                    )));
                }
                None => break,
            }
        }

        if !pending.is_empty() {
            downloaded = self
                .write_chunk(entry, &mut file, &path, &pending, downloaded)
                .await?;
        }

        file.flush().await.map_err(|e| {
            DownloadError::FileSystemError(format!("Failed to flush {}: {}", path.display(), e))
        })?;

        if let Some(expected) = total {
            if downloaded != expected {
                return Err(DownloadError::NetworkError(format!(
                    "Incomplete response body: received {} of {} bytes",
                    downloaded, expected
                )));
            }
        }

        Ok(downloaded)
    }

    async fn write_chunk(
        &self,
        entry: &DownloadEntry,
        file: &mut File,
        path: &Path,
        chunk: &[u8],
        downloaded: u64,
    ) -> Result<u64, DownloadError> {
        let downloaded = downloaded + chunk.len() as u64;
        file.write_all(chunk).await.map_err(|e| {
            DownloadError::FileSystemError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        if !self.record_progress(entry, downloaded) {
            return Err(DownloadError::Cancelled(entry.id.clone()));
        }
        Ok(downloaded)
    }

    fn begin(&self, entry: &DownloadEntry) {
        let mut item = entry.lock();
        if item.status == DownloadStatus::Pending {
            item.status = DownloadStatus::Downloading;
            let _ = self.shared.progress_tx.send(item.clone());
        }
    }

    fn set_total(&self, entry: &DownloadEntry, total: Option<u64>) {
        entry.lock().total_bytes = total;
    }

    /// Stores the cumulative count and announces it. Returns `false` once the
    /// download has left the Downloading state.
    fn record_progress(&self, entry: &DownloadEntry, downloaded: u64) -> bool {
        let mut item = entry.lock();
        if item.status != DownloadStatus::Downloading {
            return false;
        }
        item.downloaded_bytes = downloaded;
        let _ = self.shared.progress_tx.send(item.clone());
        true
    }

    /// Moves a download into a terminal status and sends its completed event.
    /// Returns `false` if it was already terminal.
    fn finish(&self, entry: &DownloadEntry, status: DownloadStatus, error: Option<String>) -> bool {
        let mut item = entry.lock();
        if item.status.is_terminal() {
            return false;
        }
        item.status = status;
        item.error_message = error;
        item.end_time = Some(Utc::now());
        let _ = self.shared.completed_tx.send(item.clone());
        true
    }
}

impl DownloadManagerTrait for DownloadManager {
    /// Registers the download and runs the transfer on the current tokio
    /// runtime, returning the new record's id immediately.
    fn start_download(&self, url: &str, directory: Option<&Path>) -> Result<String, DownloadError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| {
            DownloadError::InvalidArgument(format!("start_download needs a tokio runtime: {}", e))
        })?;

        let entry = self.register(url, directory)?;
        let id = entry.id.clone();
        let manager = self.clone();
        handle.spawn(async move {
            if let Err(e) = manager.run(entry).await {
                tracing::debug!(error = %e, "background download did not complete");
            }
        });
        Ok(id)
    }

    /// Marks a Downloading record Cancelled and aborts its transfer. Records in
    /// any other status are left untouched.
    fn cancel_download(&self, id: &str) -> Result<(), DownloadError> {
        let entry = self
            .find(id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))?;

        {
            let mut item = entry.lock();
            if item.status != DownloadStatus::Downloading {
                return Ok(());
            }
            item.status = DownloadStatus::Cancelled;
            item.end_time = Some(Utc::now());
            let _ = self.shared.completed_tx.send(item.clone());
        }
        entry.cancel.cancel();
        tracing::info!(id, "download cancellation requested");
        Ok(())
    }

    fn clear_completed(&self) {
        let mut downloads = self.lock_downloads();
        let before = downloads.len();
        downloads.retain(|entry| !entry.lock().status.is_terminal());
        tracing::debug!(removed = before - downloads.len(), "cleared finished downloads");
    }

    fn list_downloads(&self) -> Vec<DownloadItem> {
        self.lock_downloads().iter().map(|e| e.snapshot()).collect()
    }

    fn get_download(&self, id: &str) -> Option<DownloadItem> {
        self.find(id).map(|e| e.snapshot())
    }

    /// Uses the preferred directory when it names an existing directory,
    /// otherwise the platform downloads folder.
    fn resolve_download_directory(&self) -> PathBuf {
        let preferred = self.shared.settings.preferred_download_directory();
        let preferred = preferred.trim();
        if !preferred.is_empty() {
            let path = PathBuf::from(preferred);
            if path.is_dir() {
                return path;
            }
            tracing::debug!(path = preferred, "preferred download directory missing, using default");
        }
        platform::get_downloads_dir()
    }
}

fn checked_url(url: &str) -> Result<&str, DownloadError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(DownloadError::InvalidArgument("URL must not be empty".to_string()));
    }
    Ok(url)
}

/// Creates `directory` if needed and returns its absolute form.
fn prepare_directory(directory: PathBuf) -> Result<PathBuf, DownloadError> {
    std::fs::create_dir_all(&directory).map_err(|e| {
        DownloadError::FileSystemError(format!(
            "Failed to create download directory {}: {}",
            directory.display(),
            e
        ))
    })?;
    std::path::absolute(&directory).map_err(|e| {
        DownloadError::FileSystemError(format!(
            "Failed to resolve download directory {}: {}",
            directory.display(),
            e
        ))
    })
}

/// Best-effort removal of a partially written file. Failures are logged only.
async fn remove_partial_file(path: &Path, created: bool) {
    if !created {
        return;
    }
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove partial download"),
    }
}

/// Derives a file name from the last path segment of `url`.
///
/// The segment is percent-decoded and path separators are replaced; an empty
/// result falls back to `fallback`.
pub fn file_name_from_url(url: &str, fallback: &str) -> String {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(|s| s.to_string()),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .map(|s| s.to_string()),
    };

    let decoded = segment
        .map(|s| match urlencoding::decode(&s) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => s,
        })
        .unwrap_or_default();

    let cleaned: String = decoded
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Returns `desired`, or `base (n).ext` for the smallest `n` not already present in `directory`.
pub fn unique_file_name(directory: &Path, desired: &str) -> String {
    pick_free_name(desired, |candidate| directory.join(candidate).exists())
}

fn pick_free_name(desired: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(desired) {
        return desired.to_string();
    }

    let path = Path::new(desired);
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| desired.to_string());
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{} ({}){}", base, counter, extension);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Formats a byte count with 1024-based units (B, KB, MB, GB, TB), up to two
/// decimals with trailing zeros removed.
pub fn human_readable_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", size);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
