//! Shared state handed to every crawl of a run.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::HttpFetch;
use crate::config::Config;
use crate::dedup::DedupStore;

/// Default number of simultaneous media fetches.
pub const DEFAULT_MAX_CONCURRENT_DOWNLOADS: usize = 5;

/// Default number of attempts per media URL.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Tunables for the crawl and download loops.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub page_size: u32,
    pub max_concurrent_downloads: usize,
    pub max_attempts: u32,
    pub export_file: PathBuf,
    pub show_downloads: bool,
    pub show_skipped_downloads: bool,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            page_size: crate::api::DEFAULT_PAGE_SIZE,
            max_concurrent_downloads: DEFAULT_MAX_CONCURRENT_DOWNLOADS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            export_file: PathBuf::from(crate::export::DEFAULT_EXPORT_FILE),
            show_downloads: false,
            show_skipped_downloads: false,
        }
    }
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.options.page_size,
            max_concurrent_downloads: config.options.max_concurrent_downloads,
            max_attempts: config.options.max_attempts,
            export_file: config.options.export_file.clone(),
            show_downloads: config.options.show_downloads,
            show_skipped_downloads: config.options.show_skipped_downloads,
        }
    }
}

/// Everything a crawl needs besides the account itself.
///
/// Cloning is cheap; clones share the fetcher, the ledger and the
/// cancellation token.
#[derive(Clone)]
pub struct CrawlContext {
    pub fetcher: Arc<dyn HttpFetch>,
    pub ledger: Arc<DedupStore>,
    pub settings: CrawlSettings,
    pub cancel: CancellationToken,
}

impl CrawlContext {
    pub fn new(fetcher: Arc<dyn HttpFetch>, ledger: Arc<DedupStore>, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            ledger,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
