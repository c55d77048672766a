//! Bounded-concurrency media downloads with per-URL retry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::fs;

use crate::api::HttpFetch;
use crate::dedup::{canonicalize, with_original_quality, DedupStore};
use crate::download::context::CrawlContext;
use crate::download::state::BatchReport;
use crate::error::{Error, Result};
use crate::fs::media_file_name;
use crate::media::FileType;
use crate::output::create_item_bar;

/// What happened to one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Cached,
    Downloaded(FileType),
    Unsupported,
    Failed,
    Cancelled,
}

/// Downloads media URLs into one directory, skipping what the ledger has.
pub struct DownloadExecutor {
    ctx: CrawlContext,
    save_dir: PathBuf,
}

impl DownloadExecutor {
    pub fn new(ctx: CrawlContext, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx,
            save_dir: save_dir.into(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Download every URL, returning true iff all of them were already in
    /// the ledger.
    pub async fn download_all(&self, urls: &[String]) -> bool {
        self.run_batch(urls).await.all_cached()
    }

    /// Download every URL and report what happened.
    ///
    /// At most `max_concurrent_downloads` fetches are in flight; the call
    /// returns once every URL has finished or exhausted its attempts.
    pub async fn run_batch(&self, urls: &[String]) -> BatchReport {
        let progress = if self.ctx.settings.show_downloads && !urls.is_empty() {
            Some(create_item_bar(urls.len() as u64, "Downloading"))
        } else {
            None
        };

        let limit = self.ctx.settings.max_concurrent_downloads.max(1);
        let outcomes: Vec<Outcome> = stream::iter(urls)
            .map(|url| {
                let progress = progress.clone();
                async move {
                    let outcome = self.process(url).await;
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    outcome
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let mut report = BatchReport {
            total: urls.len() as u64,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                Outcome::Cached => report.cached += 1,
                Outcome::Downloaded(file_type) => report.record_download(file_type),
                Outcome::Unsupported => report.unsupported += 1,
                Outcome::Failed => report.failed += 1,
                Outcome::Cancelled => report.cancelled += 1,
            }
        }
        report
    }

    async fn process(&self, url: &str) -> Outcome {
        let canonical = canonicalize(url);

        if self.ctx.ledger.exists(canonical).await {
            if self.ctx.settings.show_skipped_downloads {
                tracing::info!("Media already downloaded: {}", canonical);
            } else {
                tracing::debug!("Media already downloaded: {}", canonical);
            }
            return Outcome::Cached;
        }

        let file_type = FileType::from_url(canonical);
        let fetch_url = match file_type {
            FileType::Image => with_original_quality(canonical),
            FileType::Audio | FileType::Video => canonical.to_string(),
            FileType::Unknown => {
                tracing::warn!("{}", Error::UnsupportedMediaType(canonical.to_string()));
                return Outcome::Unsupported;
            }
        };

        let file_name = match media_file_name(&fetch_url) {
            Ok(name) => name,
            Err(e) => {
                tracing::error!("Cannot save {}: {}", canonical, e);
                return Outcome::Failed;
            }
        };

        let body = match self.fetch_with_retry(&fetch_url).await {
            Ok(Some(body)) => body,
            Ok(None) => return Outcome::Cancelled,
            Err(e) => {
                tracing::error!("{}", e);
                return Outcome::Failed;
            }
        };

        let path = self.save_dir.join(&file_name);
        if let Err(e) = write_media(&self.save_dir, &path, &body).await {
            tracing::error!("Failed to save {}: {}", path.display(), e);
            return Outcome::Failed;
        }

        record_download(&self.ctx.ledger, canonical).await;

        if self.ctx.settings.show_downloads {
            tracing::info!("Downloaded: {}", path.display());
        }
        Outcome::Downloaded(file_type)
    }

    /// Fetch with immediate retries. `Ok(None)` means the run was cancelled.
    async fn fetch_with_retry(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let max_attempts = self.ctx.settings.max_attempts.max(1);
        let fetcher: &Arc<dyn HttpFetch> = &self.ctx.fetcher;
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            let result = tokio::select! {
                biased;
                _ = self.ctx.cancel.cancelled() => return Ok(None),
                result = fetcher.fetch(url) => result,
            };

            match result {
                Ok(body) => return Ok(Some(body)),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < max_attempts {
                        tracing::warn!(
                            "Retrying {} (attempt {}/{}): {}",
                            url,
                            attempt + 1,
                            max_attempts,
                            e
                        );
                    }
                }
            }
        }

        Err(Error::AssetFetch {
            url: url.to_string(),
            attempts: max_attempts,
            message: last_error,
        })
    }
}

async fn write_media(dir: &Path, path: &Path, body: &[u8]) -> Result<()> {
    fs::create_dir_all(dir).await?;
    fs::write(path, body).await?;
    Ok(())
}

async fn record_download(ledger: &DedupStore, canonical: &str) {
    if !ledger.add(canonical).await {
        tracing::debug!("{} was recorded by a concurrent worker", canonical);
    }
}
