//! Statistics reporting.

use console::style;

use crate::download::{BatchReport, DownloadState, GlobalState};

/// Print statistics for a single account.
pub fn print_account_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for @{}:", state.handle)).bold()
    );
    println!("  Pages:       {}", state.pages);
    println!("  Pictures:    {}", state.pic_count);
    println!("  Videos:      {}", state.vid_count);
    println!("  Audio:       {}", state.audio_count);
    println!("  Skipped:     {} (already downloaded)", state.duplicate_count);
    if state.unsupported_count > 0 {
        println!("  Unsupported: {}", state.unsupported_count);
    }
    if state.failed_count > 0 {
        println!("  Failed:      {}", style(state.failed_count).red());
    }
    println!("  Exported:    {} row(s)", state.rows_exported);
    println!("  Total:       {} downloaded", state.total_downloaded());
    if state.interrupted {
        println!("  {}", style("Interrupted before the timeline was exhausted").yellow());
    }
}

/// Print global statistics across all accounts.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Accounts processed: {}", state.accounts_processed);
    if state.accounts_failed > 0 {
        println!("  Accounts failed:    {}", style(state.accounts_failed).red());
    }
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    println!("  Audio:    {}", state.audio_count);
    println!("  Skipped:  {} (already downloaded)", state.duplicate_count);
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}

/// Print a one-line summary of a URL-file batch.
pub fn print_batch_summary(report: &BatchReport) {
    println!(
        "Downloaded: {} pics, {} vids, {} audio ({} skipped, {} failed)",
        style(report.images).green(),
        style(report.videos).green(),
        style(report.audio).green(),
        style(report.cached).yellow(),
        style(report.failed).red()
    );
}
