//! Download a fixed list of media URLs read from a JSON file.

use std::path::Path;

use crate::download::context::CrawlContext;
use crate::download::executor::DownloadExecutor;
use crate::download::state::BatchReport;
use crate::error::{Error, Result};

/// Subdirectory of the download directory used for URL-file downloads.
pub const URL_FILE_FOLDER: &str = "urls";

/// Read a JSON array of URLs.
pub fn load_url_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Storage(format!("Failed to read URL file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Storage(format!("Malformed URL file {}: {}", path.display(), e))
    })
}

/// Download every URL in `path` into `save_dir`, then persist the ledger.
pub async fn download_url_file(
    ctx: &CrawlContext,
    path: &Path,
    save_dir: &Path,
) -> Result<BatchReport> {
    let urls = load_url_file(path)?;
    tracing::info!("Loaded {} URL(s) from {}", urls.len(), path.display());

    let executor = DownloadExecutor::new(ctx.clone(), save_dir);
    let report = executor.run_batch(&urls).await;

    ctx.ledger.persist().await?;

    if report.cancelled > 0 || ctx.is_cancelled() {
        return Err(Error::Interrupted);
    }
    Ok(report)
}
