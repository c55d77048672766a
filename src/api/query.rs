//! GraphQL query construction for the UserMedia and UserByScreenName endpoints.
//!
//! Both endpoints take JSON-encoded `variables` and `features` blocks as GET
//! parameters. Only the user id, cursor, page size and screen name vary.

use serde_json::{json, Value};
use url::Url;

use crate::error::Result;

/// GraphQL API base URL.
pub const API_BASE: &str = "https://twitter.com/i/api/graphql";

const USER_MEDIA_PATH: &str = "aQQLnkexAl5z9ec_UgbEIA/UserMedia";
const USER_BY_SCREEN_NAME_PATH: &str = "qW5u-DAuXpMEG0zA1F7UGQ/UserByScreenName";

/// Default number of tweets requested per timeline page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

fn user_media_variables(user_id: &str, cursor: &str, count: u32) -> Value {
    json!({
        "userId": user_id,
        "count": count,
        "cursor": cursor,
        "includePromotedContent": false,
        "withClientEventToken": false,
        "withBirdwatchNotes": false,
        "withVoice": true,
        "withV2Timeline": true,
    })
}

fn user_media_features() -> Value {
    json!({
        "rweb_tipjar_consumption_enabled": true,
        "responsive_web_graphql_exclude_directive_enabled": true,
        "verified_phone_label_enabled": false,
        "creator_subscriptions_tweet_preview_api_enabled": true,
        "responsive_web_graphql_timeline_navigation_enabled": true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled": false,
        "communities_web_enable_tweet_community_results_fetch": true,
        "c9s_tweet_anatomy_moderator_badge_enabled": true,
        "articles_preview_enabled": true,
        "tweetypie_unmention_optimization_enabled": true,
        "responsive_web_edit_tweet_api_enabled": true,
        "graphql_is_translatable_rweb_tweet_is_translatable_enabled": true,
        "view_counts_everywhere_api_enabled": true,
        "longform_notetweets_consumption_enabled": true,
        "responsive_web_twitter_article_tweet_consumption_enabled": true,
        "tweet_awards_web_tipping_enabled": false,
        "creator_subscriptions_quote_tweet_preview_enabled": false,
        "freedom_of_speech_not_reach_fetch_enabled": true,
        "standardized_nudges_misinfo": true,
        "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled": true,
        "tweet_with_visibility_results_prefer_gql_media_interstitial_enabled": true,
        "rweb_video_timestamps_enabled": true,
        "longform_notetweets_rich_text_read_enabled": true,
        "longform_notetweets_inline_media_enabled": true,
        "responsive_web_enhance_cards_enabled": false,
    })
}

fn user_lookup_variables(screen_name: &str) -> Value {
    json!({
        "screen_name": screen_name,
        "withSafetyModeUserFields": true,
    })
}

fn user_lookup_features() -> Value {
    json!({
        "hidden_profile_likes_enabled": true,
        "hidden_profile_subscriptions_enabled": true,
        "rweb_tipjar_consumption_enabled": true,
        "responsive_web_graphql_exclude_directive_enabled": true,
        "verified_phone_label_enabled": false,
        "subscriptions_verification_info_is_identity_verified_enabled": true,
        "subscriptions_verification_info_verified_since_enabled": true,
        "highlights_tweets_tab_ui_enabled": true,
        "responsive_web_twitter_article_notes_tab_enabled": true,
        "creator_subscriptions_tweet_preview_api_enabled": true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled": false,
        "responsive_web_graphql_timeline_navigation_enabled": true,
    })
}

fn graphql_url(path: &str, variables: Value, features: Value) -> Result<Url> {
    let url = Url::parse_with_params(
        &format!("{}/{}", API_BASE, path),
        &[
            ("variables", variables.to_string()),
            ("features", features.to_string()),
        ],
    )?;
    Ok(url)
}

/// URL of one UserMedia page. An empty cursor requests the first page.
pub fn timeline_url(user_id: &str, cursor: &str, count: u32) -> Result<Url> {
    graphql_url(
        USER_MEDIA_PATH,
        user_media_variables(user_id, cursor, count),
        user_media_features(),
    )
}

/// URL of the account lookup for a screen name.
pub fn account_lookup_url(screen_name: &str) -> Result<Url> {
    graphql_url(
        USER_BY_SCREEN_NAME_PATH,
        user_lookup_variables(screen_name),
        user_lookup_features(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_json(url: &Url, key: &str) -> Value {
        let raw = url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_timeline_url() {
        let url = timeline_url("123", "DAABCgAB", DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(url.host_str(), Some("twitter.com"));
        assert_eq!(
            url.path(),
            "/i/api/graphql/aQQLnkexAl5z9ec_UgbEIA/UserMedia"
        );

        let variables = query_json(&url, "variables");
        assert_eq!(variables["userId"], "123");
        assert_eq!(variables["cursor"], "DAABCgAB");
        assert_eq!(variables["count"], 20);
        assert_eq!(variables["withV2Timeline"], true);

        let features = query_json(&url, "features");
        assert_eq!(features.as_object().unwrap().len(), 25);
        assert_eq!(features["responsive_web_enhance_cards_enabled"], false);
    }

    #[test]
    fn test_timeline_url_first_page_has_empty_cursor() {
        let url = timeline_url("123", "", 20).unwrap();
        assert_eq!(query_json(&url, "variables")["cursor"], "");
    }

    #[test]
    fn test_account_lookup_url() {
        let url = account_lookup_url("alice").unwrap();
        assert!(url.path().ends_with("/UserByScreenName"));
        assert_eq!(query_json(&url, "variables")["screen_name"], "alice");
        assert_eq!(
            query_json(&url, "features").as_object().unwrap().len(),
            12
        );
    }
}
