use std::time::Duration;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::api::{self, ErrorResponse, ListResponse};
use crate::error::CatalogError;
use crate::transport::{ApiRequest, ApiResponse, DEFAULT_BASE_URL, HttpTransport, Transport};
use crate::{ChannelSummary, CommentThread, Page, VideoDetails, VideoSummary};

/// Query terms rotated through to approximate a trending feed
pub const TRENDING_QUERIES: [&str; 8] = [
    "music 2024",
    "gaming highlights",
    "tech review",
    "tutorial",
    "entertainment",
    "sports highlights",
    "movie trailer",
    "funny moments",
];

/// Search used when the trending query fails or comes back empty
pub const TRENDING_FALLBACK_QUERY: &str = "latest popular videos";

const COMMENTS_DISABLED: &str = "commentsDisabled";

/// Picks an index below the given length
pub type QueryPicker = Box<dyn Fn(usize) -> usize + Send + Sync>;

pub fn random_picker() -> QueryPicker {
    Box::new(|len| fastrand::usize(..len.max(1)))
}

/// Credentials and request shaping shared by every call
#[derive(Clone)]
pub struct CatalogConfig {
    pub api_key: String,
    pub base_url: String,
    pub region_code: String,
    pub safe_search: String,
    pub search_max_results: u32,
    pub trending_max_results: u32,
    pub comments_max_results: u32,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            region_code: "US".to_string(),
            safe_search: "moderate".to_string(),
            search_max_results: 15,
            trending_max_results: 20,
            comments_max_results: 15,
            timeout: Duration::from_secs(15),
        }
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("region_code", &self.region_code)
            .field("safe_search", &self.safe_search)
            .field("search_max_results", &self.search_max_results)
            .field("trending_max_results", &self.trending_max_results)
            .field("comments_max_results", &self.comments_max_results)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// YouTube Data API v3 client. Holds no per-call state; share it by reference.
pub struct CatalogClient<T = HttpTransport> {
    config: CatalogConfig,
    transport: T,
    picker: QueryPicker,
}

impl CatalogClient<HttpTransport> {
    /// Client over a fresh reqwest connection pool
    pub fn connect(config: CatalogConfig) -> Result<Self, CatalogError> {
        let transport = HttpTransport::new(&config.base_url, config.timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(config: CatalogConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            picker: random_picker(),
        }
    }

    /// Replace the trending query picker
    pub fn with_picker(mut self, picker: QueryPicker) -> Self {
        self.picker = picker;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search videos by relevance. A blank query returns an empty page without a request.
    pub async fn search(&self, query: &str, page_token: Option<&str>) -> Result<Page<VideoSummary>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank search query, skipping request");
            return Ok(Page::empty());
        }

        let request = self.search_request(query, "relevance", self.config.search_max_results, page_token);
        self.list::<api::SearchItem, _>(request).await
    }

    /// Most-viewed results for a randomly picked popular query, falling back
    /// to a generic search once if that fails or finds nothing.
    pub async fn browse_trending(&self, page_token: Option<&str>) -> Result<Page<VideoSummary>, CatalogError> {
        let query = TRENDING_QUERIES[(self.picker)(TRENDING_QUERIES.len()) % TRENDING_QUERIES.len()];
        debug!("Trending query: {query}");

        let request = self.search_request(query, "viewCount", self.config.trending_max_results, page_token);
        let primary = match self.list::<api::SearchItem, _>(request).await {
            Ok(page) if !page.items.is_empty() => return Ok(page),
            Ok(_) => {
                info!("Trending query {query:?} returned no items, trying {TRENDING_FALLBACK_QUERY:?}");
                None
            }
            Err(e) => {
                info!("Trending query {query:?} failed: {e}, trying {TRENDING_FALLBACK_QUERY:?}");
                Some(e)
            }
        };

        match (self.search(TRENDING_FALLBACK_QUERY, page_token).await, primary) {
            (Ok(page), _) => Ok(page),
            (Err(fallback), Some(primary)) => Err(CatalogError::Fallback {
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            }),
            (Err(fallback), None) => Err(fallback),
        }
    }

    /// Snippet, statistics and content details. `None` if the video does not exist or is private.
    pub async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, CatalogError> {
        let request = ApiRequest::new("videos")
            .param("part", "snippet,statistics,contentDetails")
            .param("id", video_id)
            .param("key", &self.config.api_key);
        let page = self.list::<api::VideoItem, VideoDetails>(request).await?;
        Ok(page.items.into_iter().next())
    }

    /// Top-level comment threads by relevance. Videos with comments disabled yield an empty page.
    pub async fn video_comments(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<CommentThread>, CatalogError> {
        let request = ApiRequest::new("commentThreads")
            .param("part", "snippet")
            .param("videoId", video_id)
            .param("maxResults", self.config.comments_max_results)
            .param("order", "relevance")
            .param("textFormat", "html")
            .param("key", &self.config.api_key)
            .param_opt("pageToken", page_token);

        let resp = self.transport.get(request).await?;
        if resp.status == 403
            && ErrorResponse::parse(&resp.body).is_some_and(|e| e.has_reason(COMMENTS_DISABLED))
        {
            debug!("Comments disabled for {video_id}");
            return Ok(Page::empty());
        }
        decode_page::<api::CommentThreadItem, _>(check(resp)?)
    }

    /// `None` if no channel has this id
    pub async fn channel_details(&self, channel_id: &str) -> Result<Option<ChannelSummary>, CatalogError> {
        let request = ApiRequest::new("channels")
            .param("part", "snippet,statistics")
            .param("id", channel_id)
            .param("key", &self.config.api_key);
        let page = self.list::<api::ChannelItem, ChannelSummary>(request).await?;
        Ok(page.items.into_iter().next())
    }

    fn search_request(&self, query: &str, order: &str, max_results: u32, page_token: Option<&str>) -> ApiRequest {
        ApiRequest::new("search")
            .param("part", "snippet")
            .param("type", "video")
            .param("q", query)
            .param("maxResults", max_results)
            .param("order", order)
            .param("regionCode", &self.config.region_code)
            .param("safeSearch", &self.config.safe_search)
            .param("key", &self.config.api_key)
            .param_opt("pageToken", page_token)
    }

    async fn list<W, R>(&self, request: ApiRequest) -> Result<Page<R>, CatalogError>
    where
        W: DeserializeOwned,
        R: From<W>,
    {
        let resp = self.transport.get(request).await?;
        decode_page::<W, R>(check(resp)?)
    }
}

/// Turn a non-2xx response into an `Http` error carrying the API's own message
fn check(resp: ApiResponse) -> Result<ApiResponse, CatalogError> {
    if resp.is_success() {
        return Ok(resp);
    }
    let message = ErrorResponse::parse(&resp.body)
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if resp.reason.is_empty() {
                "request rejected".to_string()
            } else {
                resp.reason.clone()
            }
        });
    Err(CatalogError::http(resp.status, message))
}

fn decode_page<W, R>(resp: ApiResponse) -> Result<Page<R>, CatalogError>
where
    W: DeserializeOwned,
    R: From<W>,
{
    let list: ListResponse<W> =
        serde_json::from_str(&resp.body).map_err(|e| CatalogError::decode(e.to_string()))?;
    Ok(Page {
        items: list.items.into_iter().map(R::from).collect(),
        next_page_token: list.next_page_token,
    })
}
