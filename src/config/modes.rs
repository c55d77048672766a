//! Download mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available download modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadMode {
    /// Crawl the first configured account (default).
    #[default]
    User,
    /// Crawl every configured account in turn.
    UserList,
    /// Download the URLs listed in a JSON file.
    UrlFile,
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::User => write!(f, "user"),
            DownloadMode::UserList => write!(f, "user_list"),
            DownloadMode::UrlFile => write!(f, "url_file"),
        }
    }
}

impl FromStr for DownloadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "user" => Ok(DownloadMode::User),
            "user_list" => Ok(DownloadMode::UserList),
            "url_file" => Ok(DownloadMode::UrlFile),
            _ => Err(format!("Unknown download mode: {}", s)),
        }
    }
}

impl DownloadMode {
    /// Whether the mode crawls account timelines.
    pub fn needs_usernames(&self) -> bool {
        !matches!(self, DownloadMode::UrlFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trips_through_display() {
        for mode in [DownloadMode::User, DownloadMode::UserList, DownloadMode::UrlFile] {
            assert_eq!(mode.to_string().parse::<DownloadMode>().unwrap(), mode);
        }
        assert_eq!("url-file".parse::<DownloadMode>().unwrap(), DownloadMode::UrlFile);
        assert!("timeline".parse::<DownloadMode>().is_err());
    }
}
