use std::future::Future;
use std::time::Duration;

use log::debug;

use crate::error::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const USER_AGENT: &str = concat!("weartube/", env!("CARGO_PKG_VERSION"));

/// A GET against one API endpoint, with its query parameters in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// Add the parameter only when a value is present
    pub fn param_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    /// First value of a query parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP response, before any status interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends API requests. Implementations must be safe to share across concurrent calls.
pub trait Transport: Send + Sync {
    fn get(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, CatalogError>> + Send;
}

/// reqwest-backed transport. Clone it freely; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, CatalogError> {
        let url = format!("{}/{}", self.base_url, request.endpoint);
        debug!(
            "GET {url} {:?}",
            request.params.iter().filter(|(k, _)| *k != "key").collect::<Vec<_>>()
        );

        let resp = self.client.get(&url).query(&request.params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("{} -> {status} ({} bytes)", request.endpoint, body.len());

        Ok(ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_once, serve_stalled};

    #[test]
    fn test_request_params_in_order() {
        let req = ApiRequest::new("search")
            .param("part", "snippet")
            .param("maxResults", 15)
            .param_opt("pageToken", None)
            .param_opt("order", Some("relevance"));
        assert_eq!(
            req.params,
            vec![
                ("part", "snippet".to_string()),
                ("maxResults", "15".to_string()),
                ("order", "relevance".to_string()),
            ]
        );
        assert_eq!(req.get("maxResults"), Some("15"));
        assert_eq!(req.get("pageToken"), None);
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse {
            status: 204,
            reason: String::new(),
            body: String::new(),
        };
        let bad = ApiResponse {
            status: 404,
            reason: "Not Found".to_string(),
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let t = HttpTransport::with_client(reqwest::Client::new(), "https://example.test/v3/");
        assert_eq!(t.base_url, "https://example.test/v3");
    }

    #[tokio::test]
    async fn test_http_get_encodes_opaque_page_token() {
        let (base_url, server) = serve_once("200 OK", r#"{"items": []}"#).await;
        let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();
        let request = ApiRequest::new("search")
            .param("q", "rust lang")
            .param_opt("pageToken", Some("CAoQAA+/="));

        let resp = transport.get(request).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.reason, "OK");
        assert_eq!(resp.body, r#"{"items": []}"#);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /youtube/v3/search?"), "{request_line}");
        assert!(request_line.contains("q=rust+lang"), "{request_line}");
        assert!(request_line.contains("pageToken=CAoQAA%2B%2F%3D"), "{request_line}");
    }

    #[tokio::test]
    async fn test_http_get_keeps_error_status_and_reason() {
        let (base_url, _server) = serve_once("403 Forbidden", r#"{"error": {"code": 403, "message": "quota"}}"#).await;
        let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();

        let resp = transport.get(ApiRequest::new("videos")).await.unwrap();
        assert_eq!(resp.status, 403);
        assert_eq!(resp.reason, "Forbidden");
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_http_get_timeout_is_transport_error() {
        let base_url = serve_stalled().await;
        let transport = HttpTransport::new(&base_url, Duration::from_millis(200)).unwrap();
        let request = ApiRequest::new("search").param("key", "AIzaSECRET-KEY-123");

        let message = match transport.get(request).await.unwrap_err() {
            CatalogError::Transport { message } => message,
            other => panic!("expected transport error, got {other:?}"),
        };
        assert!(message.starts_with("timed out"), "{message}");
        assert!(!message.contains("AIzaSECRET-KEY-123"), "{message}");
    }
}
