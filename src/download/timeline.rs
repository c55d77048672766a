//! Timeline crawl: page through an account's media tab until nothing new turns up.

use crate::api::{fetch_timeline_page, Account};
use crate::download::context::CrawlContext;
use crate::download::executor::DownloadExecutor;
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::export::{append_rows, exported_keys, ExportRow};
use crate::media::{extract, extract_next_cursor};

/// Why a crawl finished normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page produced no downloadable URL.
    NoMedia,
    /// Every URL on the page was already in the ledger.
    AllCached,
    /// The page carried no bottom cursor.
    CursorExhausted,
}

/// Crawl one account's media timeline, newest page first.
///
/// Pages are processed strictly one after another: each page's downloads
/// complete before its cursor is followed. The crawl stops on an empty page,
/// a fully cached page, or a missing cursor. Whatever way it ends (including
/// a transport failure or cancellation) the ledger is persisted and the
/// collected export rows are appended before returning.
pub async fn download_timeline(
    ctx: &CrawlContext,
    account: &Account,
    state: &mut DownloadState,
) -> Result<StopReason> {
    state.account_id = Some(account.id.clone());
    state.display_name = account.display_name.clone();

    tracing::info!("Downloading media timeline for @{}...", account.handle);

    let executor = DownloadExecutor::new(ctx.clone(), state.save_dir.clone());
    let mut cursor = String::new();
    let mut export: Vec<ExportRow> = Vec::new();

    // Each media item is exported once, across runs and across pages.
    let mut exported = exported_keys(&ctx.settings.export_file).unwrap_or_else(|e| {
        tracing::warn!("{}; starting without previously exported rows", e);
        Default::default()
    });

    let outcome = loop {
        if ctx.is_cancelled() {
            break Err(Error::Interrupted);
        }

        let fetched = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => None,
            page = fetch_timeline_page(
                ctx.fetcher.as_ref(),
                &account.id,
                &cursor,
                ctx.settings.page_size,
            ) => Some(page),
        };
        let page = match fetched {
            None => break Err(Error::Interrupted),
            Some(Ok(page)) => page,
            Some(Err(e)) => {
                tracing::error!("Failed to fetch page {}: {}", state.pages + 1, e);
                break Err(e);
            }
        };
        state.pages += 1;

        let records = extract(&page);
        let mut urls = Vec::new();
        for record in &records {
            for media in &record.media {
                let row = ExportRow::new(account, record, media);
                if exported.insert(row.key()) {
                    export.push(row);
                }

                match media.download_url() {
                    Some(url) => urls.push(url.to_string()),
                    None => tracing::debug!(
                        "No downloadable rendition for {} in tweet {}",
                        media.expanded_url,
                        record.tweet_id
                    ),
                }
            }
        }

        tracing::info!(
            "Page {}: {} tweet(s), {} media URL(s)",
            state.pages,
            records.len(),
            urls.len()
        );

        if urls.is_empty() {
            break Ok(StopReason::NoMedia);
        }

        let report = executor.run_batch(&urls).await;
        state.record_batch(&report);

        if report.cancelled > 0 || ctx.is_cancelled() {
            break Err(Error::Interrupted);
        }
        if report.all_cached() {
            break Ok(StopReason::AllCached);
        }

        cursor = extract_next_cursor(&page);
        if cursor.is_empty() {
            break Ok(StopReason::CursorExhausted);
        }
        tracing::debug!("Next cursor: {}", cursor);
    };

    if matches!(outcome, Err(Error::Interrupted)) {
        state.interrupted = true;
        tracing::warn!("Crawl of @{} interrupted, saving progress", account.handle);
    }

    flush(ctx, &export, state).await?;

    match &outcome {
        Ok(reason) => tracing::info!(
            "Timeline complete after {} page(s) ({:?}): {} picture(s), {} video(s)",
            state.pages,
            reason,
            state.pic_count,
            state.vid_count
        ),
        Err(e) => tracing::debug!("Timeline ended early: {}", e),
    }

    outcome
}

/// Persist the ledger and append the export rows gathered so far.
async fn flush(ctx: &CrawlContext, export: &[ExportRow], state: &mut DownloadState) -> Result<()> {
    ctx.ledger.persist().await?;
    append_rows(&ctx.settings.export_file, export)?;
    state.rows_exported += export.len() as u64;
    Ok(())
}
