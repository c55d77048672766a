//! Twitter HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde_json::Value;

use crate::api::auth::build_session_headers;
use crate::api::query::{account_lookup_url, timeline_url, API_BASE};
use crate::api::types::{Account, UserLookupResponse};
use crate::error::{Error, Result};
use crate::media::parse_page;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fetches the body of a URL.
///
/// Implementations attach whatever session material the target needs and
/// report every failure (connection, timeout, non-success status) as
/// [`Error::Transport`].
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Cookie-authenticated client for the GraphQL API and media CDNs.
pub struct TwitterApi {
    client: Client,
    session_headers: HeaderMap,
}

impl TwitterApi {
    /// Create a client. Fails if the cookie carries no CSRF token.
    pub fn new(
        cookie: &str,
        bearer_token: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let session_headers = build_session_headers(cookie, bearer_token)?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            session_headers,
        })
    }
}

#[async_trait]
impl HttpFetch for TwitterApi {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);

        // Session cookies only go to the API host, never to the media CDNs.
        if url.starts_with(API_BASE) {
            request = request.headers(self.session_headers.clone());
        }

        tracing::debug!("GET {}", url);

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{}: {}", url, e)))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == 429 {
            return Err(Error::Transport(format!("{}: rate limited", url)));
        }

        if status == 401 || status == 403 {
            return Err(Error::Transport(format!(
                "{}: HTTP {} (check the session cookie)",
                url, status
            )));
        }

        if !status.is_success() {
            return Err(Error::Transport(format!("{}: HTTP {}", url, status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("{}: failed to read body: {}", url, e)))?;

        Ok(body.to_vec())
    }
}

/// Resolve a handle to its numeric id and profile.
pub async fn resolve_account(fetcher: &dyn HttpFetch, handle: &str) -> Result<Account> {
    let url = account_lookup_url(handle)?;
    let body = fetcher.fetch(url.as_str()).await?;

    let response: UserLookupResponse = serde_json::from_slice(&body).map_err(|e| {
        Error::Transport(format!("Malformed account lookup response for {}: {}", handle, e))
    })?;

    response.into_account(handle)
}

/// Fetch one timeline page. An empty cursor requests the first page.
///
/// The body is parsed leniently: a payload that is not JSON comes back as
/// `Value::Null`.
pub async fn fetch_timeline_page(
    fetcher: &dyn HttpFetch,
    user_id: &str,
    cursor: &str,
    page_size: u32,
) -> Result<Value> {
    let url = timeline_url(user_id, cursor, page_size)?;
    let body = fetcher.fetch(url.as_str()).await?;
    Ok(parse_page(&body))
}
