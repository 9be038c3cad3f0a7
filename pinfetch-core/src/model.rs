use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// An image found on the board page, paired with its high-resolution URL.
///
/// Created once during the resolving phase and consumed by the downloader;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredImage {
    pub source_url: String,
    pub resolved_url: String,
}

/// A successfully written download. Immutable once the file is on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub sequence: u32,
    pub fingerprint: String,
    pub local_path: PathBuf,
}

/// Outcome of one run of the download pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSummary {
    pub attempted: usize,
    pub downloaded: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub elapsed: Duration,
    pub records: Vec<DownloadRecord>,
}

impl DownloadSummary {
    pub fn new(attempted: usize) -> Self {
        Self {
            attempted,
            downloaded: 0,
            duplicates: 0,
            failed: 0,
            elapsed: Duration::from_secs(0),
            records: Vec::new(),
        }
    }
}
