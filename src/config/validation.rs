//! Configuration validation logic.

use crate::api::auth::{extract_cookie_value, CSRF_COOKIE};
use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Maximum handle length accepted by the site.
const MAX_USERNAME_LENGTH: usize = 15;

/// Largest page size the timeline endpoint honours.
const MAX_PAGE_SIZE: u32 = 100;

/// Validate the entire configuration, normalising usernames in place.
pub fn validate_config(config: &mut Config) -> Result<()> {
    validate_cookie(&config.account.cookie)?;

    if config.account.user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }
    if config.account.bearer_token.trim().is_empty() {
        return Err(Error::MissingConfig("bearer_token".to_string()));
    }

    if config.options.download_mode.needs_usernames() {
        config.targets.usernames = normalize_usernames(&config.targets.usernames)?;
    }

    validate_options(config)
}

/// Validate the session cookie.
pub fn validate_cookie(cookie: &str) -> Result<()> {
    if cookie.trim().is_empty() {
        return Err(Error::MissingConfig("cookie".to_string()));
    }

    match extract_cookie_value(cookie, CSRF_COOKIE) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(Error::ConfigValidation {
            field: "cookie".to_string(),
            message: format!(
                "Cookie must contain a '{}=' entry copied from a logged-in browser session",
                CSRF_COOKIE
            ),
        }),
    }
}

/// Strip leading `@`, check each handle, and drop repeats while keeping order.
pub fn normalize_usernames<S: AsRef<str>>(usernames: &[S]) -> Result<Vec<String>> {
    if usernames.is_empty() {
        return Err(Error::MissingConfig(
            "usernames (at least one account handle required)".to_string(),
        ));
    }

    let pattern = Regex::new(r"^[A-Za-z0-9_]+$")
        .map_err(|e| Error::Config(format!("Invalid username pattern: {}", e)))?;

    let mut normalized: Vec<String> = Vec::with_capacity(usernames.len());
    for username in usernames {
        let username = username.as_ref().trim();
        let clean = username.trim_start_matches('@');

        if clean.is_empty() || clean.len() > MAX_USERNAME_LENGTH {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' must be 1 to {} characters",
                    username, MAX_USERNAME_LENGTH
                ),
            });
        }

        if !pattern.is_match(clean) {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' contains invalid characters. Only letters, digits and underscores allowed.",
                    username
                ),
            });
        }

        if !normalized.iter().any(|u| u.eq_ignore_ascii_case(clean)) {
            normalized.push(clean.to_string());
        }
    }

    Ok(normalized)
}

fn validate_options(config: &Config) -> Result<()> {
    let options = &config.options;

    if options.max_concurrent_downloads == 0 {
        return Err(Error::ConfigValidation {
            field: "max_concurrent_downloads".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if options.max_attempts == 0 {
        return Err(Error::ConfigValidation {
            field: "max_attempts".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if options.page_size == 0 || options.page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!("Must be between 1 and {} (got {})", MAX_PAGE_SIZE, options.page_size),
        });
    }

    if options.request_timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_seconds".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DownloadMode;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.account.cookie = "auth_token=abc; ct0=csrf123".to_string();
        config.targets.usernames = vec!["alice".to_string()];
        config
    }

    #[test]
    fn test_valid_config() {
        let mut config = valid_config();
        assert!(validate_config(&mut config).is_ok());
    }

    #[test]
    fn test_cookie_requires_csrf_token() {
        assert!(matches!(validate_cookie(""), Err(Error::MissingConfig(_))));
        assert!(matches!(
            validate_cookie("auth_token=abc"),
            Err(Error::ConfigValidation { .. })
        ));
        assert!(validate_cookie("ct0=x").is_ok());
    }

    #[test]
    fn test_normalize_usernames() {
        let names = normalize_usernames(&["@alice", "bob_99", "Alice"]).unwrap();
        assert_eq!(names, vec!["alice", "bob_99"]);
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(normalize_usernames::<&str>(&[]).is_err());
        assert!(normalize_usernames(&["@"]).is_err());
        assert!(normalize_usernames(&["way_too_long_handle"]).is_err());
        assert!(normalize_usernames(&["user-name"]).is_err());
    }

    #[test]
    fn test_url_file_mode_needs_no_usernames() {
        let mut config = valid_config();
        config.targets.usernames.clear();
        config.options.download_mode = DownloadMode::UrlFile;
        assert!(validate_config(&mut config).is_ok());
    }

    #[test]
    fn test_option_bounds() {
        let mut config = valid_config();
        config.options.page_size = 101;
        assert!(validate_config(&mut config).is_err());

        let mut config = valid_config();
        config.options.max_concurrent_downloads = 0;
        assert!(validate_config(&mut config).is_err());

        let mut config = valid_config();
        config.options.max_attempts = 0;
        assert!(validate_config(&mut config).is_err());
    }
}
