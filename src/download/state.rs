//! Download state tracking.

use std::path::PathBuf;

use crate::media::FileType;

/// Outcome counts of one `download_all` batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// URLs handed to the batch.
    pub total: u64,
    /// URLs already present in the ledger.
    pub cached: u64,
    pub images: u64,
    pub videos: u64,
    pub audio: u64,
    /// URLs whose extension is not a known media type.
    pub unsupported: u64,
    /// URLs that failed every attempt, or could not be written.
    pub failed: u64,
    /// URLs abandoned because the run was cancelled.
    pub cancelled: u64,
}

impl BatchReport {
    /// True when every URL in the batch was already downloaded.
    ///
    /// An empty batch counts as fully cached.
    pub fn all_cached(&self) -> bool {
        self.cached == self.total
    }

    pub fn downloaded(&self) -> u64 {
        self.images + self.videos + self.audio
    }

    pub(crate) fn record_download(&mut self, file_type: FileType) {
        match file_type {
            FileType::Image => self.images += 1,
            FileType::Video => self.videos += 1,
            FileType::Audio => self.audio += 1,
            FileType::Unknown => {}
        }
    }
}

/// Per-account crawl state and statistics.
#[derive(Debug, Default)]
pub struct DownloadState {
    // Account info
    pub handle: String,
    pub account_id: Option<String>,
    pub display_name: String,

    // Paths
    pub save_dir: PathBuf,

    // Statistics
    pub pages: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
    pub duplicate_count: u64,
    pub unsupported_count: u64,
    pub failed_count: u64,
    pub rows_exported: u64,
    pub interrupted: bool,
}

impl DownloadState {
    /// Create a new download state for an account.
    pub fn new(handle: String, save_dir: PathBuf) -> Self {
        Self {
            handle,
            save_dir,
            ..Default::default()
        }
    }

    /// Fold one batch's outcome into the totals.
    pub fn record_batch(&mut self, report: &BatchReport) {
        self.pic_count += report.images;
        self.vid_count += report.videos;
        self.audio_count += report.audio;
        self.duplicate_count += report.cached;
        self.unsupported_count += report.unsupported;
        self.failed_count += report.failed;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count
    }
}

/// Global statistics across all accounts.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub duplicate_count: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
    pub failed_count: u64,
    pub accounts_processed: u64,
    pub accounts_failed: u64,
}

impl GlobalState {
    /// Add statistics from an account's download state.
    pub fn add_account_stats(&mut self, state: &DownloadState) {
        self.duplicate_count += state.duplicate_count;
        self.pic_count += state.pic_count;
        self.vid_count += state.vid_count;
        self.audio_count += state.audio_count;
        self.failed_count += state.failed_count;
        self.accounts_processed += 1;
    }

    /// Mark an account as failed.
    pub fn mark_account_failed(&mut self) {
        self.accounts_failed += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count
    }
}
