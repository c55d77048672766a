//! Timeline response parsing.
//!
//! UserMedia responses place tweets under one of two shapes. The first page
//! nests them in a grid module (`entries[*].content.items[*]`); subsequent
//! pages append to that module instead (`moduleItems[*]`). Both end in the
//! same `item.itemContent.tweet_results.result` object.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::media::item::{MediaItem, MediaKind, MediaVariant, TweetRecord};

/// Sentinel contained in the entry id of the next-page cursor.
pub const BOTTOM_CURSOR_MARKER: &str = "bottom";

/// Source timestamp grammar, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const SOURCE_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// One step of a path into a JSON tree.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Key(&'static str),
    /// Map the rest of the path over every element of an array.
    Each,
}

use Segment::{Each, Key};

const TIMELINE_PREFIX: &[Segment] = &[
    Key("data"),
    Key("user"),
    Key("result"),
    Key("timeline_v2"),
    Key("timeline"),
    Key("instructions"),
    Each,
];

const FIRST_PAGE_INFIX: &[Segment] = &[Key("entries"), Each, Key("content"), Key("items"), Each];

const NEXT_PAGE_INFIX: &[Segment] = &[Key("moduleItems"), Each];

const TWEET_RESULT_SUFFIX: &[Segment] = &[
    Key("item"),
    Key("itemContent"),
    Key("tweet_results"),
    Key("result"),
];

const CURSOR_SUFFIX: &[Segment] = &[Key("entries")];

/// The result of walking a path: either a single value or the per-element
/// results of an `Each` step, which may nest arbitrarily.
#[derive(Debug)]
enum Selection<'a> {
    Leaf(&'a Value),
    Many(Vec<Selection<'a>>),
}

fn select<'a>(value: &'a Value, path: &[Segment]) -> Option<Selection<'a>> {
    match path.split_first() {
        None => Some(Selection::Leaf(value)),
        Some((Key(key), rest)) => value.get(*key).and_then(|v| select(v, rest)),
        Some((Each, rest)) => value
            .as_array()
            .map(|items| Selection::Many(items.iter().filter_map(|v| select(v, rest)).collect())),
    }
}

fn select_joined<'a>(value: &'a Value, parts: &[&[Segment]]) -> Option<Selection<'a>> {
    let path: Vec<Segment> = parts.iter().flat_map(|p| p.iter().copied()).collect();
    select(value, &path)
}

/// Flatten a selection into its leaf values, pre-order and left to right.
///
/// Leaves that are themselves arrays are flattened too, so the output never
/// contains an array.
fn flatten<'a>(selection: Selection<'a>, out: &mut Vec<&'a Value>) {
    match selection {
        Selection::Many(children) => {
            for child in children {
                flatten(child, out);
            }
        }
        Selection::Leaf(Value::Array(items)) => {
            for item in items {
                flatten(Selection::Leaf(item), out);
            }
        }
        Selection::Leaf(value) => out.push(value),
    }
}

fn flattened<'a>(root: &'a Value, parts: &[&[Segment]]) -> Vec<&'a Value> {
    let mut out = Vec::new();
    if let Some(selection) = select_joined(root, parts) {
        flatten(selection, &mut out);
    }
    out
}

// Wire shapes. Everything is defaulted; the API omits fields freely.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TweetResult {
    legacy: Option<LegacyTweet>,
    core: Option<TweetCore>,
    /// Present on `TweetWithVisibilityResults` wrappers.
    tweet: Option<Box<TweetResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TweetCore {
    user_results: UserResults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserResults {
    result: UserResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserResult {
    legacy: UserLegacy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserLegacy {
    screen_name: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyTweet {
    created_at: String,
    id_str: String,
    full_text: String,
    extended_entities: ExtendedEntities,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtendedEntities {
    media: Vec<RawMedia>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMedia {
    #[serde(rename = "type")]
    media_type: String,
    expanded_url: String,
    media_url_https: String,
    video_info: VideoInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VideoInfo {
    variants: Vec<RawVariant>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVariant {
    content_type: String,
    url: String,
    bitrate: Option<u64>,
}

impl TweetResult {
    fn into_record(self) -> Option<TweetRecord> {
        if let Some(inner) = self.tweet {
            if self.legacy.is_none() {
                return inner.into_record();
            }
        }

        let legacy = self.legacy?;
        let author = self.core.map(|c| c.user_results.result.legacy).unwrap_or_default();

        Some(TweetRecord {
            date: parse_source_date(&legacy.created_at),
            created_at: legacy.created_at,
            tweet_id: legacy.id_str,
            text: legacy.full_text,
            author_handle: author.screen_name,
            author_display_name: author.name,
            media: legacy
                .extended_entities
                .media
                .into_iter()
                .map(RawMedia::into_item)
                .collect(),
        })
    }
}

impl RawMedia {
    fn into_item(self) -> MediaItem {
        let kind = MediaKind::from_source_type(&self.media_type);
        let variants = match kind {
            MediaKind::Video => self
                .video_info
                .variants
                .into_iter()
                .map(|v| MediaVariant {
                    content_type: v.content_type,
                    url: v.url,
                    bitrate: v.bitrate,
                })
                .collect(),
            MediaKind::Image | MediaKind::Other => Vec::new(),
        };

        MediaItem {
            kind,
            source_type: self.media_type,
            expanded_url: self.expanded_url,
            media_url: self.media_url_https,
            variants,
        }
    }
}

fn decode_records(items: &[&Value]) -> Vec<TweetRecord> {
    items
        .iter()
        .filter_map(|value| match TweetResult::deserialize(*value) {
            Ok(result) => result.into_record(),
            Err(e) => {
                tracing::debug!("Skipping undecodable tweet result: {}", e);
                None
            }
        })
        .collect()
}

fn media_count(records: &[TweetRecord]) -> usize {
    records.iter().map(|r| r.media.len()).sum()
}

/// Parse a raw response body, treating malformed JSON as an empty page.
pub fn parse_page(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::warn!(
            "{}",
            Error::Parse(format!("timeline response is not valid JSON: {}", e))
        );
        Value::Null
    })
}

/// Extract the tweets and their media from one timeline page.
///
/// The first-page shape is tried first; only when it yields no media at all
/// is the subsequent-page shape used. The two are never merged. A payload of
/// any other shape yields an empty list.
pub fn extract(page: &Value) -> Vec<TweetRecord> {
    let first = decode_records(&flattened(
        page,
        &[TIMELINE_PREFIX, FIRST_PAGE_INFIX, TWEET_RESULT_SUFFIX],
    ));
    if media_count(&first) > 0 {
        return first;
    }

    let next = decode_records(&flattened(
        page,
        &[TIMELINE_PREFIX, NEXT_PAGE_INFIX, TWEET_RESULT_SUFFIX],
    ));
    tracing::debug!(
        "First-page shape had no media, subsequent-page shape yielded {} tweet(s)",
        next.len()
    );
    next
}

/// Find the cursor for the next page.
///
/// Scans every instruction's entries for an id containing `bottom` and
/// returns its `content.value`; the last match wins. Returns an empty string
/// at the end of the timeline.
pub fn extract_next_cursor(page: &Value) -> String {
    let mut cursor = String::new();
    for entry in flattened(page, &[TIMELINE_PREFIX, CURSOR_SUFFIX]) {
        let entry_id = entry.get("entryId").and_then(Value::as_str).unwrap_or("");
        if entry_id.contains(BOTTOM_CURSOR_MARKER) {
            cursor = entry
                .pointer("/content/value")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
        }
    }
    cursor
}

/// Convert a source timestamp to `YYYY-MM-DD`; empty on failure.
pub fn parse_source_date(input: &str) -> String {
    match DateTime::parse_from_str(input, SOURCE_TIME_FORMAT) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(e) => {
            if !input.is_empty() {
                tracing::debug!("Could not parse timestamp '{}': {}", input, e);
            }
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn photo(id: &str, media_url: &str) -> Value {
        json!({
            "type": "photo",
            "expanded_url": format!("https://twitter.com/alice/status/{}/photo/1", id),
            "media_url_https": media_url,
        })
    }

    pub fn video(id: &str, variants: Value) -> Value {
        json!({
            "type": "video",
            "expanded_url": format!("https://twitter.com/alice/status/{}/video/1", id),
            "media_url_https": format!("https://pbs.twimg.com/ext_tw_video_thumb/{}/pu/img/poster.jpg", id),
            "video_info": { "variants": variants },
        })
    }

    pub fn tweet(id: &str, media: Vec<Value>) -> Value {
        json!({
            "item": { "itemContent": { "tweet_results": { "result": {
                "__typename": "Tweet",
                "core": { "user_results": { "result": { "legacy": {
                    "screen_name": "alice",
                    "name": "Alice",
                }}}},
                "legacy": {
                    "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                    "id_str": id,
                    "full_text": format!("tweet {}", id),
                    "extended_entities": { "media": media },
                },
            }}}}
        })
    }

    fn cursor_entries(cursor: Option<&str>) -> Vec<Value> {
        let mut entries = vec![json!({
            "entryId": "cursor-top-1",
            "content": { "value": "TOP" },
        })];
        if let Some(cursor) = cursor {
            entries.push(json!({
                "entryId": "cursor-bottom-0",
                "content": { "value": cursor },
            }));
        }
        entries
    }

    fn wrap(instructions: Vec<Value>) -> Value {
        json!({ "data": { "user": { "result": { "timeline_v2": { "timeline": {
            "instructions": instructions,
        }}}}}})
    }

    /// First-page shape: tweets inside a grid module entry.
    pub fn first_page(tweets: Vec<Value>, cursor: Option<&str>) -> Value {
        let mut entries = vec![json!({
            "entryId": "profile-grid-0",
            "content": { "items": tweets },
        })];
        entries.extend(cursor_entries(cursor));
        wrap(vec![
            json!({ "type": "TimelineClearCache" }),
            json!({ "type": "TimelineAddEntries", "entries": entries }),
        ])
    }

    /// Subsequent-page shape: tweets appended as module items.
    pub fn next_page(tweets: Vec<Value>, cursor: Option<&str>) -> Value {
        wrap(vec![
            json!({ "type": "TimelineAddToModule", "moduleItems": tweets }),
            json!({ "type": "TimelineAddEntries", "entries": cursor_entries(cursor) }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_first_page() {
        let page = first_page(
            vec![
                tweet("1", vec![photo("1", "https://pbs.twimg.com/media/a.jpg")]),
                tweet(
                    "2",
                    vec![
                        photo("2", "https://pbs.twimg.com/media/b.png"),
                        photo("2", "https://pbs.twimg.com/media/c.jpg"),
                    ],
                ),
            ],
            Some("NEXT"),
        );

        let records = extract(&page);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tweet_id, "1");
        assert_eq!(records[0].date, "2018-10-10");
        assert_eq!(records[0].author_handle, "alice");
        assert_eq!(records[0].author_display_name, "Alice");
        assert_eq!(records[1].text, "tweet 2");

        let urls: Vec<&str> = records
            .iter()
            .flat_map(|r| r.media.iter())
            .filter_map(|m| m.download_url())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://pbs.twimg.com/media/a.jpg",
                "https://pbs.twimg.com/media/b.png",
                "https://pbs.twimg.com/media/c.jpg",
            ]
        );
    }

    #[test]
    fn test_extract_falls_back_to_module_items() {
        let page = next_page(
            vec![tweet("9", vec![photo("9", "https://pbs.twimg.com/media/z.jpg")])],
            Some("NEXT"),
        );
        let records = extract(&page);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tweet_id, "9");
        assert_eq!(records[0].media[0].kind, MediaKind::Image);
    }

    #[test]
    fn test_extract_never_merges_shapes() {
        let mut page = first_page(
            vec![tweet("1", vec![photo("1", "https://pbs.twimg.com/media/a.jpg")])],
            None,
        );
        page["data"]["user"]["result"]["timeline_v2"]["timeline"]["instructions"]
            .as_array_mut()
            .unwrap()
            .push(json!({
                "type": "TimelineAddToModule",
                "moduleItems": [tweet("2", vec![photo("2", "https://pbs.twimg.com/media/b.jpg")])],
            }));

        let records = extract(&page);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tweet_id, "1");
    }

    #[test]
    fn test_extract_video_uses_highest_bitrate() {
        let page = first_page(
            vec![tweet(
                "5",
                vec![video(
                    "5",
                    json!([
                        { "content_type": "application/x-mpegURL", "url": "https://video.twimg.com/pl.m3u8" },
                        { "content_type": "video/mp4", "bitrate": 832000, "url": "https://video.twimg.com/v/480.mp4" },
                        { "content_type": "video/mp4", "bitrate": 2176000, "url": "https://video.twimg.com/v/720.mp4" },
                        { "content_type": "video/mp4", "bitrate": 832000, "url": "https://video.twimg.com/v/480b.mp4" },
                    ]),
                )],
            )],
            None,
        );

        let records = extract(&page);
        let item = &records[0].media[0];
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.variants.len(), 4);
        assert_eq!(item.variants[0].bitrate, None);
        assert_eq!(item.download_url(), Some("https://video.twimg.com/v/720.mp4"));
    }

    #[test]
    fn test_extract_handles_visibility_wrapper() {
        let mut wrapped = tweet("7", vec![photo("7", "https://pbs.twimg.com/media/w.jpg")]);
        let inner = wrapped["item"]["itemContent"]["tweet_results"]["result"].take();
        wrapped["item"]["itemContent"]["tweet_results"]["result"] = json!({
            "__typename": "TweetWithVisibilityResults",
            "tweet": inner,
        });

        let records = extract(&first_page(vec![wrapped], None));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tweet_id, "7");
    }

    #[test]
    fn test_extract_malformed_payloads() {
        assert!(extract(&Value::Null).is_empty());
        assert!(extract(&json!({ "data": { "user": {} } })).is_empty());
        assert!(extract(&json!({ "data": { "user": { "result": { "timeline_v2": {
            "timeline": { "instructions": "not-an-array" }
        }}}}}))
        .is_empty());
        assert!(extract(&parse_page(b"{ not json")).is_empty());
    }

    #[test]
    fn test_extract_keeps_tweets_with_bad_dates() {
        let mut t = tweet("3", vec![photo("3", "https://pbs.twimg.com/media/d.jpg")]);
        t["item"]["itemContent"]["tweet_results"]["result"]["legacy"]["created_at"] =
            json!("yesterday");
        let records = extract(&first_page(vec![t], None));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "");
        assert_eq!(records[0].created_at, "yesterday");
    }

    #[test]
    fn test_flatten_is_depth_unbounded_and_ordered() {
        let value = json!([[{ "n": 1 }, [{ "n": 2 }, [[{ "n": 3 }]]]], { "n": 4 }, []]);
        let mut out = Vec::new();
        flatten(Selection::Leaf(&value), &mut out);
        let ns: Vec<i64> = out.iter().map(|v| v["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_extract_next_cursor() {
        let page = first_page(Vec::new(), Some("DAABCgAB"));
        assert_eq!(extract_next_cursor(&page), "DAABCgAB");

        let page = next_page(Vec::new(), Some("DAACCgAC"));
        assert_eq!(extract_next_cursor(&page), "DAACCgAC");
    }

    #[test]
    fn test_extract_next_cursor_absent() {
        let page = first_page(
            vec![tweet("1", vec![photo("1", "https://pbs.twimg.com/media/a.jpg")])],
            None,
        );
        assert_eq!(extract_next_cursor(&page), "");
        assert_eq!(extract_next_cursor(&Value::Null), "");
    }

    #[test]
    fn test_parse_source_date() {
        assert_eq!(
            parse_source_date("Wed Oct 10 20:19:24 +0000 2018"),
            "2018-10-10"
        );
        // Offset is honoured: still the 1st locally.
        assert_eq!(
            parse_source_date("Mon Jan 01 23:30:00 -0500 2024"),
            "2024-01-01"
        );
        assert_eq!(parse_source_date("2018-10-10"), "");
        assert_eq!(parse_source_date(""), "");
    }
}
