//! Retrieval of the template catalogue
//!
//! This module contains the HTTP side of the pipeline: the GitHub contents
//! envelope, the fetcher with its cache and stale fallback, and the error
//! types shared by both fetch paths.

pub mod envelope;
pub mod fetcher;

pub use fetcher::{MetaFetcher, ProxyDocument, DEFAULT_SOURCE_URL, PROXY_PATH};

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Timeout applied to every outbound request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single attempt to retrieve or decode a document failed
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Connection, timeout or body read failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    /// The envelope has no `content` field
    #[error("response envelope has no content field")]
    MissingContent,

    /// The envelope declares an encoding other than base64
    #[error("unsupported content encoding: {0}")]
    UnsupportedEncoding(String),

    /// The `content` field is not valid base64
    #[error("failed to decode base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload is not valid JSON
    #[error("failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// Required configuration is missing
    #[error("missing configuration: {0}")]
    Config(&'static str),

    /// Retrieval failed and no cached data exists to fall back on
    #[error("no data available and nothing cached: {0}")]
    Unavailable(#[source] RetrievalError),

    /// Retrieval failed on a path without fallback
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// Builds the HTTP client used by both fetch paths
pub(crate) fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_keeps_cause() {
        let err = FetchError::Unavailable(RetrievalError::Status(StatusCode::BAD_GATEWAY));
        let text = err.to_string();
        assert!(text.contains("nothing cached"));
        assert!(text.contains("502"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_retrieval_is_transparent() {
        let err = FetchError::from(RetrievalError::MissingContent);
        assert_eq!(err.to_string(), "response envelope has no content field");
    }

    #[test]
    fn test_config_error_message() {
        let err = FetchError::Config("proxy base URL");
        assert_eq!(err.to_string(), "missing configuration: proxy base URL");
    }
}
