//! Media item representation.

use std::fmt;

/// Classification of a media entity as reported by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Map a source `type` field onto a kind.
    pub fn from_source_type(source_type: &str) -> Self {
        match source_type {
            "photo" => MediaKind::Image,
            "video" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// File type inferred from a URL's extension, used to decide how to fetch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Image,
    Audio,
    Video,
    Unknown,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "wma", "ogg", "m4a"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv"];

impl FileType {
    /// Infer the file type from the extension a URL ends with.
    ///
    /// Expects a canonical URL; a trailing query string or quality marker
    /// makes the type unknown.
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_ascii_lowercase();
        let ext = match lower.rsplit_once('.') {
            Some((_, ext)) if !ext.contains('/') => ext,
            _ => return FileType::Unknown,
        };

        if IMAGE_EXTENSIONS.contains(&ext) {
            FileType::Image
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            FileType::Audio
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            FileType::Video
        } else {
            FileType::Unknown
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Image => write!(f, "image"),
            FileType::Audio => write!(f, "audio"),
            FileType::Video => write!(f, "video"),
            FileType::Unknown => write!(f, "unknown"),
        }
    }
}

/// One encoding rendition of a video asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaVariant {
    pub content_type: String,
    pub url: String,
    pub bitrate: Option<u64>,
}

/// A media entity attached to a tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Kind derived from the item's own `type` field.
    pub kind: MediaKind,

    /// Raw `type` value (`photo`, `video`, `animated_gif`, ...).
    pub source_type: String,

    /// Link to the tweet the media belongs to.
    pub expanded_url: String,

    /// `media_url_https`; for videos this is the poster frame.
    pub media_url: String,

    /// Video renditions in source order. Empty for non-video items.
    pub variants: Vec<MediaVariant>,
}

impl MediaItem {
    /// The URL the executor should fetch for this item, if any.
    ///
    /// Videos resolve to their highest-bitrate variant and contribute nothing
    /// when they have no variants. Everything else hands over `media_url`;
    /// the executor applies the original-quality marker for images.
    pub fn download_url(&self) -> Option<&str> {
        match self.kind {
            MediaKind::Video => select_best_variant(&self.variants).map(|v| v.url.as_str()),
            MediaKind::Image | MediaKind::Other => {
                Some(self.media_url.as_str()).filter(|u| !u.is_empty())
            }
        }
    }
}

/// Pick the variant with the greatest bitrate; the first one wins ties.
///
/// A missing bitrate counts as zero.
pub fn select_best_variant(variants: &[MediaVariant]) -> Option<&MediaVariant> {
    let mut best: Option<&MediaVariant> = None;
    for variant in variants {
        match best {
            Some(current) if variant.bitrate.unwrap_or(0) <= current.bitrate.unwrap_or(0) => {}
            _ => best = Some(variant),
        }
    }
    best
}

/// A tweet together with the media it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetRecord {
    /// Timestamp as sent by the API (`Wed Oct 10 20:19:24 +0000 2018`).
    pub created_at: String,

    /// `created_at` reduced to `YYYY-MM-DD`, empty when it did not parse.
    pub date: String,

    pub tweet_id: String,
    pub text: String,
    pub author_handle: String,
    pub author_display_name: String,
    pub media: Vec<MediaItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(url: &str, bitrate: Option<u64>) -> MediaVariant {
        MediaVariant {
            content_type: "video/mp4".to_string(),
            url: url.to_string(),
            bitrate,
        }
    }

    #[test]
    fn test_select_best_variant_first_max_wins() {
        let variants = vec![
            variant("https://video.twimg.com/a.m3u8", Some(0)),
            variant("https://video.twimg.com/832-first.mp4", Some(832_000)),
            variant("https://video.twimg.com/2176.mp4", Some(2_176_000)),
            variant("https://video.twimg.com/832-second.mp4", Some(832_000)),
        ];
        let best = select_best_variant(&variants).unwrap();
        assert_eq!(best.url, "https://video.twimg.com/2176.mp4");

        let tied = vec![
            variant("https://video.twimg.com/one.mp4", Some(950_000)),
            variant("https://video.twimg.com/two.mp4", Some(950_000)),
        ];
        assert_eq!(
            select_best_variant(&tied).unwrap().url,
            "https://video.twimg.com/one.mp4"
        );
    }

    #[test]
    fn test_select_best_variant_empty() {
        assert!(select_best_variant(&[]).is_none());
    }

    #[test]
    fn test_video_without_variants_has_no_download_url() {
        let item = MediaItem {
            kind: MediaKind::Video,
            source_type: "video".to_string(),
            expanded_url: "https://twitter.com/alice/status/1/video/1".to_string(),
            media_url: "https://pbs.twimg.com/ext_tw_video_thumb/1/pu/img/x.jpg".to_string(),
            variants: Vec::new(),
        };
        assert_eq!(item.download_url(), None);
    }

    #[test]
    fn test_image_download_url_is_media_url() {
        let item = MediaItem {
            kind: MediaKind::Image,
            source_type: "photo".to_string(),
            expanded_url: String::new(),
            media_url: "https://pbs.twimg.com/media/abc.jpg".to_string(),
            variants: Vec::new(),
        };
        assert_eq!(item.download_url(), Some("https://pbs.twimg.com/media/abc.jpg"));
    }

    #[test]
    fn test_media_kind_from_source_type() {
        assert_eq!(MediaKind::from_source_type("photo"), MediaKind::Image);
        assert_eq!(MediaKind::from_source_type("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_source_type("animated_gif"), MediaKind::Other);
        assert_eq!(MediaKind::from_source_type(""), MediaKind::Other);
    }

    #[test]
    fn test_file_type_from_url() {
        assert_eq!(
            FileType::from_url("https://pbs.twimg.com/media/abc.JPG"),
            FileType::Image
        );
        assert_eq!(
            FileType::from_url("https://video.twimg.com/v/1280x720/clip.mp4"),
            FileType::Video
        );
        assert_eq!(
            FileType::from_url("https://example.com/voice/note.m4a"),
            FileType::Audio
        );
        assert_eq!(
            FileType::from_url("https://video.twimg.com/pl/playlist.m3u8"),
            FileType::Unknown
        );
        assert_eq!(
            FileType::from_url("https://example.com.au/path/noext"),
            FileType::Unknown
        );
        assert_eq!(FileType::from_url(""), FileType::Unknown);
    }
}
