use log::warn;
use serde::Serialize;

use crate::catalog::CatalogClient;
use crate::transport::Transport;
use crate::{ChannelSummary, CommentThread, Page, VideoDetails, build_embed_reference, parse_duration};

/// Everything the player screen shows for one video
#[derive(Debug, Clone, Serialize)]
pub struct VideoPage {
    pub video_id: String,
    pub embed_url: String,
    pub duration: String,
    pub details: Option<VideoDetails>,
    pub channel: Option<ChannelSummary>,
    pub comments: Page<CommentThread>,
}

/// Load details, channel and the first page of comments for a video.
///
/// Details (then channel) and comments are fetched concurrently. Their failures
/// are logged and rendered as absence rather than failing the page. The result is
/// returned by value, so dropping the future discards everything.
pub async fn load_video_page<T: Transport>(client: &CatalogClient<T>, video_id: &str) -> VideoPage {
    let embed_url = build_embed_reference(video_id, false);

    let details_then_channel = async {
        let details = client.video_details(video_id).await.unwrap_or_else(|e| {
            warn!("Video details for {video_id} unavailable: {e}");
            None
        });
        let channel = match details.as_ref().map(|d| d.channel_id.as_str()).filter(|id| !id.is_empty()) {
            Some(channel_id) => client.channel_details(channel_id).await.unwrap_or_else(|e| {
                warn!("Channel {channel_id} unavailable: {e}");
                None
            }),
            None => None,
        };
        (details, channel)
    };

    let comments = async {
        client.video_comments(video_id, None).await.unwrap_or_else(|e| {
            warn!("Comments for {video_id} unavailable: {e}");
            Page::empty()
        })
    };

    let ((details, channel), comments) = tokio::join!(details_then_channel, comments);

    VideoPage {
        video_id: video_id.to_string(),
        embed_url,
        duration: parse_duration(details.as_ref().and_then(|d| d.duration_raw.as_deref())),
        details,
        channel,
        comments,
    }
}
