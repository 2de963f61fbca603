use thiserror::Error;

/// Failure of a catalog operation. Empty results are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Network unreachable, DNS failure, timeout
    #[error("request failed: {message}")]
    Transport { message: String },

    /// Non-2xx response from the API
    #[error("API returned {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body could not be parsed
    #[error("unexpected response: {message}")]
    Decode { message: String },

    /// Trending browse and its fallback search both failed
    #[error("trending failed ({primary}); fallback failed ({fallback})")]
    Fallback {
        primary: Box<CatalogError>,
        fallback: Box<CatalogError>,
    },
}

impl CatalogError {
    pub fn transport(message: impl Into<String>) -> Self {
        CatalogError::Transport {
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        CatalogError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        CatalogError::Decode {
            message: message.into(),
        }
    }

    /// HTTP status code, if this error came from a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    /// The request URL carries the API key in its query, so it never reaches the message
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            CatalogError::transport(format!("timed out: {e}"))
        } else {
            CatalogError::transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display() {
        let e = CatalogError::http(403, "quota exceeded");
        assert_eq!(e.to_string(), "API returned 403: quota exceeded");
        assert_eq!(e.status(), Some(403));
    }

    #[test]
    fn test_fallback_mentions_both_causes() {
        let e = CatalogError::Fallback {
            primary: Box::new(CatalogError::http(500, "backend error")),
            fallback: Box::new(CatalogError::transport("connection refused")),
        };
        let msg = e.to_string();
        assert!(msg.contains("backend error"));
        assert!(msg.contains("connection refused"));
        assert_eq!(e.status(), None);
    }
}
