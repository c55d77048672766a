//! Download module for content downloading.
//!
//! This module provides:
//! - The shared crawl context and its settings
//! - Download state tracking
//! - Bounded-concurrency media downloads
//! - Timeline pagination
//! - URL-file downloads

pub mod context;
pub mod executor;
pub mod state;
pub mod timeline;
pub mod urls;

pub use context::{CrawlContext, CrawlSettings};
pub use executor::DownloadExecutor;
pub use state::{BatchReport, DownloadState, GlobalState};
pub use timeline::{download_timeline, StopReason};
pub use urls::{download_url_file, load_url_file, URL_FILE_FOLDER};
