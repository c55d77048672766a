//! Twitter Media Downloader - incremental media timeline crawler.
//!
//! This library pages through the media tab of Twitter accounts and downloads
//! every photo and video it has not seen before.
//!
//! # Features
//!
//! - Cursor-driven timeline pagination that stops at already-known media
//! - Bounded-concurrency downloads with per-asset retry
//! - A persisted URL ledger shared across runs and accounts
//! - An append-only CSV record of every discovered media item
//! - Batch account crawls and plain URL-list downloads
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use twitter_media_downloader::{
//!     download::{download_timeline, CrawlContext, CrawlSettings, DownloadState},
//!     resolve_account, DedupStore, TwitterApi,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = TwitterApi::new(
//!         "auth_token=...; ct0=...",
//!         twitter_media_downloader::api::auth::DEFAULT_BEARER_TOKEN,
//!         "Mozilla/5.0",
//!         Duration::from_secs(30),
//!     )?;
//!     let ledger = Arc::new(DedupStore::open("log.json").await);
//!     let ctx = CrawlContext::new(Arc::new(api), ledger, CrawlSettings::default());
//!
//!     let account = resolve_account(ctx.fetcher.as_ref(), "alice").await?;
//!     let mut state = DownloadState::new(account.handle.clone(), "alice".into());
//!     download_timeline(&ctx, &account, &mut state).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod error;
pub mod export;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{resolve_account, Account, HttpFetch, TwitterApi};
pub use config::{Config, DownloadMode};
pub use dedup::DedupStore;
pub use download::{
    download_timeline, download_url_file, CrawlContext, DownloadExecutor, DownloadState,
    GlobalState,
};
pub use error::{Error, Result};
pub use media::{MediaItem, MediaKind, TweetRecord};
