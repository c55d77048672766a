//! Session headers for authenticated GraphQL requests.

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::{Error, Result};

/// Bearer token embedded in the public web client.
pub const DEFAULT_BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

/// Cookie holding the CSRF token that must be echoed in `x-csrf-token`.
pub const CSRF_COOKIE: &str = "ct0";

/// Extract the value of one field from a `name=value; name=value` cookie string.
pub fn extract_cookie_value<'a>(cookie: &'a str, name: &str) -> Option<&'a str> {
    cookie.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Build the header set sent with every GraphQL request.
pub fn build_session_headers(cookie: &str, bearer_token: &str) -> Result<HeaderMap> {
    let csrf = extract_cookie_value(cookie, CSRF_COOKIE).ok_or_else(|| Error::ConfigValidation {
        field: "cookie".to_string(),
        message: format!("Cookie has no '{}' field", CSRF_COOKIE),
    })?;

    let mut headers = HeaderMap::new();
    headers.insert("x-csrf-token", header_value("cookie", csrf)?);
    headers.insert(header::COOKIE, header_value("cookie", cookie)?);
    headers.insert(
        header::AUTHORIZATION,
        header_value("bearer_token", &format!("Bearer {}", bearer_token))?,
    );
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));

    Ok(headers)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| Error::ConfigValidation {
        field: field.to_string(),
        message: "Value contains characters not allowed in an HTTP header".to_string(),
    })
}
