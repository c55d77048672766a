//! Console output utilities.

use console::style;

use crate::api::Account;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Twitter Media Downloader                          ║
║     Incremental media timeline crawler                ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(accounts: &[String], download_mode: &str, download_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    if !accounts.is_empty() {
        println!("  Accounts: {}", accounts.join(", "));
    }
    println!("  Mode: {}", download_mode);
    println!("  Directory: {}", download_dir);
    println!();
}

/// Print the profile of an account about to be crawled.
pub fn print_account_profile(account: &Account) {
    println!();
    println!(
        "{} {}",
        style(&account.display_name).bold(),
        style(format!("@{}", account.handle)).dim()
    );
    println!("  ID:        {}", account.id);
    println!("  Followers: {}", account.followers_count);
    println!("  Following: {}", account.following_count);
    println!("  Media:     {}", account.media_count);
    println!();
}
