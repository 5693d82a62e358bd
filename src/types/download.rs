use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Status of a file download.
///
/// `Pending -> Downloading -> {Completed | Failed | Cancelled}`. The last three
/// are terminal and accept no further transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadStatus {
    Pending,
    Downloading,
    Completed,
    Failed,
    Cancelled,
}

impl DownloadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadStatus::Completed | DownloadStatus::Failed | DownloadStatus::Cancelled
        )
    }
}

/// Represents a file download with its progress and outcome.
///
/// Values handed out by the download manager are snapshots; the live record
/// stays inside the manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub destination_path: PathBuf,
    /// `None` when the server did not report a content length.
    pub total_bytes: Option<u64>,
    pub downloaded_bytes: u64,
    pub status: DownloadStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl DownloadItem {
    pub fn new(id: String, url: String, file_name: String, destination_path: PathBuf) -> Self {
        Self {
            id,
            url,
            file_name,
            destination_path,
            total_bytes: None,
            downloaded_bytes: 0,
            status: DownloadStatus::Pending,
            start_time: Utc::now(),
            end_time: None,
            error_message: None,
        }
    }

    /// Percentage in `0.0..=100.0`, or `0.0` when the total is unknown.
    pub fn progress(&self) -> f64 {
        match self.total_bytes {
            Some(total) if total > 0 => self.downloaded_bytes as f64 / total as f64 * 100.0,
            _ => 0.0,
        }
    }

    /// Elapsed time, measured up to `end_time` once the download has ended.
    pub fn duration(&self) -> TimeDelta {
        self.end_time.unwrap_or_else(Utc::now) - self.start_time
    }
}
