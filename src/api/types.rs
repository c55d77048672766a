//! API response type definitions.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A resolved account: the identity a crawl runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Numeric `rest_id`, used as `userId` in timeline queries.
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub media_count: u64,
}

/// Envelope of the UserByScreenName response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserLookupResponse {
    pub data: UserLookupData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserLookupData {
    pub user: Option<UserLookupUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserLookupUser {
    pub result: Option<UserLookupResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserLookupResult {
    pub rest_id: String,
    pub legacy: UserProfile,
}

/// Profile fields of a user.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub screen_name: String,
    pub name: String,
    pub followers_count: u64,
    pub friends_count: u64,
    pub media_count: u64,
}

impl UserLookupResponse {
    /// Turn a lookup response into an [`Account`].
    ///
    /// Suspended or unknown handles come back without a `result` (or with an
    /// empty `rest_id`); those are reported as [`Error::AccountNotFound`].
    pub fn into_account(self, requested: &str) -> Result<Account> {
        let result = self
            .data
            .user
            .and_then(|u| u.result)
            .filter(|r| !r.rest_id.is_empty())
            .ok_or_else(|| Error::AccountNotFound(requested.to_string()))?;

        let profile = result.legacy;
        let handle = if profile.screen_name.is_empty() {
            requested.to_string()
        } else {
            profile.screen_name
        };

        Ok(Account {
            id: result.rest_id,
            handle,
            display_name: profile.name,
            followers_count: profile.followers_count,
            following_count: profile.friends_count,
            media_count: profile.media_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_account() {
        let body = r#"{"data":{"user":{"result":{
            "__typename":"User","rest_id":"123",
            "legacy":{"screen_name":"alice","name":"Alice A.","followers_count":10,
                      "friends_count":5,"media_count":42}}}}}"#;
        let response: UserLookupResponse = serde_json::from_str(body).unwrap();
        let account = response.into_account("alice").unwrap();

        assert_eq!(account.id, "123");
        assert_eq!(account.handle, "alice");
        assert_eq!(account.display_name, "Alice A.");
        assert_eq!(account.followers_count, 10);
        assert_eq!(account.following_count, 5);
        assert_eq!(account.media_count, 42);
    }

    #[test]
    fn test_into_account_missing_user() {
        let response: UserLookupResponse = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(matches!(
            response.into_account("ghost"),
            Err(Error::AccountNotFound(name)) if name == "ghost"
        ));
    }
}
