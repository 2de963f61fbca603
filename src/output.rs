use serde::Serialize;

use crate::page::VideoPage;
use crate::text::format_count;
use crate::{ChannelSummary, CommentThread, Page, VideoDetails, VideoSummary};

/// Render any record as pretty JSON
pub fn render_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// One video per line: `id  title (channel)`, then the continuation token if any
pub fn render_videos(page: &Page<VideoSummary>) -> String {
    if page.items.is_empty() {
        return "No videos found".to_string();
    }
    let mut lines: Vec<String> = page
        .items
        .iter()
        .map(|v| format!("{}  {} ({})", v.id, v.title, v.channel_title))
        .collect();
    push_token(&mut lines, &page.next_page_token);
    lines.join("\n")
}

pub fn render_details(details: &VideoDetails) -> String {
    let mut lines = vec![
        details.title.clone(),
        format!("Channel: {} ({})", details.channel_title, details.channel_id),
        format!("Duration: {}", details.duration()),
    ];
    let stats: Vec<String> = [
        details.view_count.map(|n| format_count(n, "views")),
        details.like_count.map(|n| format_count(n, "likes")),
        details.comment_count.map(|n| format_count(n, "comments")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !stats.is_empty() {
        lines.push(stats.join(" · "));
    }
    if !details.tags.is_empty() {
        lines.push(format!("Tags: {}", details.tags.join(", ")));
    }
    lines.push(String::new());
    if details.description.trim().is_empty() {
        lines.push("No description available".to_string());
    } else {
        lines.push(details.description.clone());
    }
    lines.join("\n")
}

pub fn render_comments(page: &Page<CommentThread>) -> String {
    if page.items.is_empty() {
        return "No comments".to_string();
    }
    let mut lines: Vec<String> = page
        .items
        .iter()
        .map(|c| format!("{} [{}]: {}", c.author_display_name, c.like_count, c.sanitized_text()))
        .collect();
    push_token(&mut lines, &page.next_page_token);
    lines.join("\n")
}

pub fn render_channel(channel: &ChannelSummary) -> String {
    let subscribers = match (channel.hidden_subscriber_count, channel.subscriber_count) {
        (true, _) | (false, None) => "hidden subscribers".to_string(),
        (false, Some(n)) => format_count(n, "subscribers"),
    };
    let videos = channel
        .video_count
        .map(|n| format_count(n, "videos"))
        .unwrap_or_default();
    format!("{} ({})\n{subscribers} {videos}", channel.title, channel.id)
        .trim_end()
        .to_string()
}

pub fn render_video_page(page: &VideoPage) -> String {
    let mut sections = vec![format!("Embed: {}", page.embed_url)];
    match &page.details {
        Some(details) => sections.push(render_details(details)),
        None => sections.push(format!("{}\nNo description available", page.video_id)),
    }
    if let Some(ref channel) = page.channel {
        sections.push(render_channel(channel));
    }
    sections.push(render_comments(&page.comments));
    sections.join("\n\n")
}

fn push_token(lines: &mut Vec<String>, token: &Option<String>) {
    if let Some(token) = token {
        lines.push(format!("next page: {token}"));
    }
}
