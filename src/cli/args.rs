//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, DownloadMode};

/// Twitter media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "twitter-media-downloader",
    version,
    about = "Incrementally download media timelines from Twitter accounts",
    long_about = "A CLI tool to download the photos and videos of Twitter accounts.\n\n\
                  Previously downloaded media is remembered in a ledger file, so each run \
                  only fetches what is new and stops paging once it reaches known media."
)]
pub struct Args {
    /// Account handle(s) to download from.
    /// Can specify multiple users separated by spaces.
    #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
    pub user: Option<Vec<String>>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Full browser cookie string (must contain ct0).
    #[arg(long, env = "TWITTER_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "TWITTER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Download mode.
    #[arg(long, value_enum)]
    pub mode: Option<DownloadModeArg>,

    /// JSON file listing media URLs (for --mode url-file).
    #[arg(long = "url-file")]
    pub url_file: Option<PathBuf>,

    /// Remove a URL from the download ledger and exit.
    #[arg(long, value_name = "URL")]
    pub forget: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Maximum simultaneous media downloads.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Attempts per media URL before giving up.
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Show information about skipped downloads.
    #[arg(long)]
    pub show_skipped: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI download mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownloadModeArg {
    /// Crawl the first configured account.
    User,
    /// Crawl every configured account in turn.
    UserList,
    /// Download the URLs listed in a JSON file.
    UrlFile,
}

impl From<DownloadModeArg> for DownloadMode {
    fn from(arg: DownloadModeArg) -> Self {
        match arg {
            DownloadModeArg::User => DownloadMode::User,
            DownloadModeArg::UserList => DownloadMode::UserList,
            DownloadModeArg::UrlFile => DownloadMode::UrlFile,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(users) = &self.user {
            config.targets.usernames = users.clone();
            // Several handles on the command line imply a batch crawl.
            if users.len() > 1 && self.mode.is_none() {
                config.options.download_mode = DownloadMode::UserList;
            }
        }

        if let Some(cookie) = &self.cookie {
            config.account.cookie = cookie.clone();
        }

        if let Some(user_agent) = &self.user_agent {
            config.account.user_agent = user_agent.clone();
        }

        if let Some(dir) = &self.download_directory {
            config.options.download_directory = Some(dir.clone());
        }

        if let Some(mode) = self.mode {
            config.options.download_mode = mode.into();
        }

        if let Some(url_file) = &self.url_file {
            config.options.url_file = url_file.clone();
            if self.mode.is_none() {
                config.options.download_mode = DownloadMode::UrlFile;
            }
        }

        if let Some(concurrency) = self.concurrency {
            config.options.max_concurrent_downloads = concurrency;
        }

        if let Some(attempts) = self.attempts {
            config.options.max_attempts = attempts;
        }

        // Boolean flags (only override if set to non-default)
        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }

        if self.show_skipped {
            config.options.show_skipped_downloads = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "twitter-media-downloader",
            "--user",
            "alice",
            "--concurrency",
            "2",
            "--quiet",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.targets.usernames, vec!["alice"]);
        assert_eq!(config.options.download_mode, DownloadMode::User);
        assert_eq!(config.options.max_concurrent_downloads, 2);
        assert!(!config.options.show_downloads);
    }

    #[test]
    fn test_multiple_users_switch_to_batch_mode() {
        let args = Args::parse_from(["twitter-media-downloader", "-u", "alice", "bob"]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.targets.usernames, vec!["alice", "bob"]);
        assert_eq!(config.options.download_mode, DownloadMode::UserList);
    }

    #[test]
    fn test_url_file_implies_mode() {
        let args = Args::parse_from(["twitter-media-downloader", "--url-file", "list.json"]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.options.download_mode, DownloadMode::UrlFile);
        assert_eq!(config.options.url_file, PathBuf::from("list.json"));
    }
}
