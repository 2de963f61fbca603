mod api;
pub mod catalog;
pub mod config;
pub mod duration;
pub mod embed;
pub mod error;
pub mod output;
pub mod page;
pub mod text;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use catalog::{CatalogClient, CatalogConfig};
pub use duration::parse_duration;
pub use embed::build_embed_reference;
pub use error::CatalogError;

/// A video as listed by search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub channel_id: String,
    pub description: String,
    pub published_at: String,
    pub thumbnail_url: String,
}

/// Full metadata for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
    pub tags: Vec<String>,
    pub duration_raw: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl VideoDetails {
    /// Display duration, `0:00` when unknown
    pub fn duration(&self) -> String {
        parse_duration(self.duration_raw.as_deref())
    }
}

/// Top-level comment of a thread. `text_display` is raw markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    pub id: String,
    pub video_id: String,
    pub author_display_name: String,
    pub author_profile_image_url: String,
    pub text_display: String,
    pub like_count: u64,
    pub published_at: String,
}

impl CommentThread {
    pub fn sanitized_text(&self) -> String {
        text::sanitize_comment(&self.text_display)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub subscriber_count: Option<u64>,
    pub hidden_subscriber_count: bool,
    pub video_count: Option<u64>,
}

/// One page of results, in API order. No token means no further pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: None,
        }
    }
}

static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Bare 11-character video ID
        r"^([a-zA-Z0-9_-]{11})$",
        r"youtube\.com/watch\?.*v=([a-zA-Z0-9_-]{11})",
        r"youtu\.be/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid video id regex"))
    .collect()
});

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| caps[1].to_string())
}
