//! Wire shapes of the YouTube Data API v3 responses.
//!
//! Every field is optional: the API omits parts that were not requested, and
//! deleted or private resources come back with partial snippets.

use serde::Deserialize;

use crate::{ChannelSummary, CommentThread, VideoDetails, VideoSummary};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: Option<String>,
}

impl Thumbnails {
    /// Medium variant first, then default
    fn best_url(&self) -> String {
        self.medium
            .as_ref()
            .and_then(|t| t.url.clone())
            .or_else(|| self.default.as_ref().and_then(|t| t.url.clone()))
            .unwrap_or_default()
    }
}

fn thumbnail_url(thumbnails: &Option<Thumbnails>) -> String {
    thumbnails.as_ref().map(Thumbnails::best_url).unwrap_or_default()
}

/// Statistics arrive as decimal strings and may exceed 32 bits
fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

// search

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: Option<SearchItemId>,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItemId {
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchSnippet {
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    pub channel_title: Option<String>,
}

impl From<SearchItem> for VideoSummary {
    fn from(item: SearchItem) -> Self {
        let snippet = item.snippet.unwrap_or_default();
        VideoSummary {
            id: item.id.and_then(|i| i.video_id).unwrap_or_default(),
            thumbnail_url: thumbnail_url(&snippet.thumbnails),
            title: snippet.title.unwrap_or_default(),
            channel_title: snippet.channel_title.unwrap_or_default(),
            channel_id: snippet.channel_id.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            published_at: snippet.published_at.unwrap_or_default(),
        }
    }
}

// videos

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoItem {
    pub id: Option<String>,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSnippet {
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContentDetails {
    pub duration: Option<String>,
}

impl From<VideoItem> for VideoDetails {
    fn from(item: VideoItem) -> Self {
        let snippet = item.snippet.unwrap_or_default();
        let stats = item.statistics.unwrap_or_default();
        VideoDetails {
            id: item.id.unwrap_or_default(),
            title: snippet.title.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            channel_id: snippet.channel_id.unwrap_or_default(),
            channel_title: snippet.channel_title.unwrap_or_default(),
            published_at: snippet.published_at.unwrap_or_default(),
            tags: snippet.tags.unwrap_or_default(),
            duration_raw: item.content_details.and_then(|c| c.duration),
            view_count: parse_count(stats.view_count.as_deref()),
            like_count: parse_count(stats.like_count.as_deref()),
            comment_count: parse_count(stats.comment_count.as_deref()),
        }
    }
}

// commentThreads

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadItem {
    pub id: Option<String>,
    pub snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet {
    pub video_id: Option<String>,
    pub top_level_comment: Option<Comment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Comment {
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    pub video_id: Option<String>,
    pub text_display: Option<String>,
    pub author_display_name: Option<String>,
    pub author_profile_image_url: Option<String>,
    pub like_count: Option<u64>,
    pub published_at: Option<String>,
}

impl From<CommentThreadItem> for CommentThread {
    fn from(item: CommentThreadItem) -> Self {
        let thread = item.snippet.unwrap_or_default();
        let comment = thread
            .top_level_comment
            .and_then(|c| c.snippet)
            .unwrap_or_default();
        CommentThread {
            id: item.id.unwrap_or_default(),
            video_id: thread.video_id.or(comment.video_id).unwrap_or_default(),
            author_display_name: comment.author_display_name.unwrap_or_default(),
            author_profile_image_url: comment.author_profile_image_url.unwrap_or_default(),
            text_display: comment.text_display.unwrap_or_default(),
            like_count: comment.like_count.unwrap_or(0),
            published_at: comment.published_at.unwrap_or_default(),
        }
    }
}

// channels

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelItem {
    pub id: Option<String>,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelStatistics {
    pub subscriber_count: Option<String>,
    pub hidden_subscriber_count: Option<bool>,
    pub video_count: Option<String>,
}

impl From<ChannelItem> for ChannelSummary {
    fn from(item: ChannelItem) -> Self {
        let snippet = item.snippet.unwrap_or_default();
        let stats = item.statistics.unwrap_or_default();
        ChannelSummary {
            id: item.id.unwrap_or_default(),
            thumbnail_url: thumbnail_url(&snippet.thumbnails),
            title: snippet.title.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            subscriber_count: parse_count(stats.subscriber_count.as_deref()),
            hidden_subscriber_count: stats.hidden_subscriber_count.unwrap_or(false),
            video_count: parse_count(stats.video_count.as_deref()),
        }
    }
}

// errors

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub reason: Option<String>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Option<ErrorBody> {
        serde_json::from_str::<ErrorResponse>(body).ok()?.error
    }
}

impl ErrorBody {
    pub fn has_reason(&self, reason: &str) -> bool {
        self.errors.iter().any(|e| e.reason.as_deref() == Some(reason))
    }
}
