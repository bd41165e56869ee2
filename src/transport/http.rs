//! Reqwest-backed transport.
//!
//! Owns transport details only: resolving request URLs against a base, sending
//! headers and JSON bodies, and collapsing network, status and decoding problems
//! into a [`TransportError`].

use crate::config::{ClientConfig, ConfigError};
use crate::framework::{Method, Transport, TransportError, TransportRequest, TransportResult};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// A [`Transport`] that performs real HTTP requests against one base URL.
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base` is not a valid URL or the reqwest client cannot
    /// be constructed.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ConfigError> {
        // Without a trailing slash, `Url::join` would replace the last path segment.
        let normalized = if base.ends_with('/') { base.to_string() } else { format!("{base}/") };
        let base = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url, config.timeout)
    }

    /// Resolves a request URL (usually relative, e.g. `api/heroes/11`) against the base.
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base
            .join(url)
            .map_err(|e| TransportError::new(format!("Invalid request URL {url}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult {
        let target = self.resolve(&request.url)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, target);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| map_transport_error(&request.url, e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| map_transport_error(&request.url, e))?;
        if !status.is_success() {
            return Err(TransportError::status(
                &request.url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes).map(Some).map_err(TransportError::decode)
    }
}

fn map_transport_error(url: &str, error: reqwest::Error) -> TransportError {
    let message = if error.is_timeout() {
        format!("Http failure response for {url}: request timed out")
    } else {
        format!("Http failure response for {url}: {error}")
    };
    TransportError::new(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::JSON_CONTENT_TYPE;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Builds a raw HTTP/1.1 response with a correct `Content-Length`.
    fn canned(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// True once the headers and the whole `Content-Length` body have arrived.
    fn request_complete(raw: &str) -> bool {
        let Some(end) = raw.find("\r\n\r\n") else {
            return false;
        };
        let length = raw[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= end + 4 + length
    }

    /// Accepts one connection, answers it with `response`, and yields the raw request.
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = String::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&raw) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.push_str(&String::from_utf8_lossy(&buf[..n]));
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            raw
        });
        (base, handle)
    }

    fn transport_for(base: &str) -> HttpTransport {
        HttpTransport::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_error_status_becomes_transport_error() {
        let (base, server) = serve_once(canned("404 Not Found", "")).await;

        let result = transport_for(&base).send(TransportRequest::get("api/heroes/99")).await;

        let error = result.unwrap_err();
        assert_eq!(error.message, "Http failure response for api/heroes/99: 404 Not Found");
        assert_eq!(error.status, Some(404));
        assert!(server.await.unwrap().starts_with("GET /api/heroes/99 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_no_content_is_none() {
        let no_content = "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string();
        let (base, server) = serve_once(no_content).await;

        let result = transport_for(&base).send(TransportRequest::delete("api/heroes/11").json()).await;

        assert_eq!(result, Ok(None));
        assert!(server.await.unwrap().starts_with("DELETE /api/heroes/11 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_whitespace_body_is_none() {
        let (base, server) = serve_once(canned("200 OK", "  \n")).await;

        let result = transport_for(&base)
            .send(TransportRequest::put("api/heroes", json!({"id": 11, "name": "A"})))
            .await;

        assert_eq!(result, Ok(None));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_parsing_failure() {
        let (base, server) = serve_once(canned("200 OK", "not json")).await;

        let result = transport_for(&base).send(TransportRequest::get("api/heroes")).await;

        let error = result.unwrap_err();
        assert!(error.message.starts_with("Http failure during parsing"));
        assert_eq!(error.status, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_json_body_and_content_type_are_forwarded() {
        let (base, server) = serve_once(canned("201 Created", r#"{"id":21,"name":"X"}"#)).await;

        let result = transport_for(&base)
            .send(TransportRequest::post("api/heroes", json!({"name": "X"})).json())
            .await;

        assert_eq!(result, Ok(Some(json!({"id": 21, "name": "X"}))));
        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/heroes HTTP/1.1"));
        assert!(raw
            .to_ascii_lowercase()
            .contains(&format!("content-type: {JSON_CONTENT_TYPE}")));
        assert!(raw.ends_with(r#"{"name":"X"}"#));
    }

    #[test]
    fn test_relative_urls_resolve_under_base_path() {
        let transport = HttpTransport::new("http://localhost:8080/v1", Duration::from_secs(1)).unwrap();

        assert_eq!(
            transport.resolve("api/heroes/?name=ma").unwrap().as_str(),
            "http://localhost:8080/v1/api/heroes/?name=ma"
        );
        assert_eq!(
            transport.resolve("api/heroes/11").unwrap().as_str(),
            "http://localhost:8080/v1/api/heroes/11"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpTransport::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let result = transport.send(TransportRequest::get("api/heroes")).await;

        let error = result.unwrap_err();
        assert!(error.message.starts_with("Http failure response for api/heroes"));
        assert_eq!(error.status, None);
    }
}
