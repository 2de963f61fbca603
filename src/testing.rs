use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::catalog::{CatalogClient, CatalogConfig};
use crate::error::CatalogError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// In-memory transport with per-endpoint scripted responses
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<ApiResponse, CatalogError>>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: &'static str, status: u16, body: &str) -> Self {
        let reason = match status {
            200 => "OK",
            403 => "Forbidden",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "",
        };
        self.push(
            endpoint,
            Ok(ApiResponse {
                status,
                reason: reason.to_string(),
                body: body.to_string(),
            }),
        )
    }

    pub fn fail(self, endpoint: &'static str, message: &str) -> Self {
        self.push(endpoint, Err(CatalogError::transport(message)))
    }

    fn push(self, endpoint: &'static str, response: Result<ApiResponse, CatalogError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, CatalogError> {
        let endpoint = request.endpoint;
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(CatalogError::transport(format!("no scripted response for {endpoint}"))))
    }
}

pub fn client(transport: FakeTransport) -> CatalogClient<FakeTransport> {
    CatalogClient::new(CatalogConfig::new("test-key"), transport).with_picker(Box::new(|_| 0))
}

pub fn search_body(ids: &[&str], next_page_token: Option<&str>) -> String {
    let items: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": id},
                "snippet": {"title": format!("title {id}"), "channelTitle": "chan", "channelId": "UC1"}
            })
        })
        .collect();
    serde_json::json!({"items": items, "nextPageToken": next_page_token}).to_string()
}

pub fn error_body(code: u16, message: &str, reason: &str) -> String {
    serde_json::json!({
        "error": {"code": code, "message": message, "errors": [{"reason": reason, "message": message}]}
    })
    .to_string()
}

/// Local HTTP server that answers one request with `status` and a JSON `body`.
///
/// Returns the base URL to point a transport at and a handle yielding the request line it received.
pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request_line = read_request_line(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request_line
    });
    (format!("http://{addr}/youtube/v3"), handle)
}

/// Local server that accepts a connection and never answers
pub async fn serve_stalled() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_line(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    });
    format!("http://{addr}/youtube/v3")
}

/// Base URL of a port nothing listens on
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/youtube/v3")
}

async fn read_request_line(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).lines().next().unwrap_or_default().to_string()
}
