//! Twitter API module.
//!
//! This module provides:
//! - The `HttpFetch` seam and its reqwest-backed implementation
//! - Session header construction from a browser cookie
//! - GraphQL query construction for timeline and account lookups
//! - API response types

pub mod auth;
pub mod client;
pub mod query;
pub mod types;

pub use client::{fetch_timeline_page, resolve_account, HttpFetch, TwitterApi};
pub use query::DEFAULT_PAGE_SIZE;
pub use types::Account;
