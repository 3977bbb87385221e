use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::models::{Method, Request, Response};

use super::NetError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// The policy layer has no timeout handling of its own; this is the only
/// knob, and 30s fails fast enough for the offline fallback to feel usable.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Live network access for the agent.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Perform one live fetch. Resolves with the server's response
    /// whatever its status; fails only on connectivity/timeout errors.
    async fn fetch(&self, request: &Request) -> Result<Response, NetError>;
}

/// HTTP client for fetching application assets.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    origin: String,
}

impl HttpClient {
    /// Build a client that resolves origin-relative request URLs
    /// against `origin` (e.g. `http://127.0.0.1:8080`).
    pub fn new(origin: impl Into<String>) -> Result<Self, NetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a request URL to an absolute one. Manifest paths are
    /// origin-relative ("./", "./app.js"); absolute URLs pass through.
    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        let path = url.trim_start_matches('.');
        if path.starts_with('/') {
            format!("{}{}", self.origin, path)
        } else {
            format!("{}/{}", self.origin, path)
        }
    }
}

#[async_trait]
impl NetworkClient for HttpClient {
    async fn fetch(&self, request: &Request) -> Result<Response, NetError> {
        let url = self.resolve(&request.url);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Head => self.client.head(&url),
            Method::Post => self.client.post(&url),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| NetError::from_transport(&url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| NetError::from_transport(&url, e))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_paths() {
        let client = HttpClient::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(client.resolve("./"), "http://127.0.0.1:8080/");
        assert_eq!(client.resolve("./app.js"), "http://127.0.0.1:8080/app.js");
        assert_eq!(
            client.resolve("./icons/icon-192.png"),
            "http://127.0.0.1:8080/icons/icon-192.png"
        );
    }

    #[test]
    fn test_resolve_passes_absolute_urls_through() {
        let client = HttpClient::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            client.resolve("https://cdn.example/app.js"),
            "https://cdn.example/app.js"
        );
    }
}
