//! # Core Transport Contract
//!
//! This module defines the generic building blocks every hero operation is built on.
//!
//! ## Key Types
//!
//! - [`Transport`]: The injected collaborator that performs one HTTP-style exchange.
//! - [`TransportRequest`]: Method, URL, headers and optional JSON body of one call.
//! - [`TransportError`]: The single failure kind (network, non-2xx status, decoding).
//! - [`MessageSink`]: The injected log collector with an `add(message)` capability.
//! - [`ChannelTransport`]: A [`Transport`] that forwards requests to a task over a channel.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Display};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE REQUEST
// =============================================================================

/// HTTP verbs used against the collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Content type sent with every request that carries a JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One outbound call, fully described.
///
/// # Architecture Note
/// The request is plain data so that every transport (real HTTP, in-memory backend,
/// test mocks) sees exactly the same thing. Tests compare requests with `==`, which is
/// how "these two calls issue an identical request" is asserted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, url).with_body(body)
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, url).with_body(body)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Marks the request as carrying JSON (`Content-Type: application/json`).
    pub fn json(self) -> Self {
        self.with_header("Content-Type", JSON_CONTENT_TYPE)
    }

    /// Looks up a header value, ignoring ASCII case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// =============================================================================
// 2. THE SINGLE ERROR KIND
// =============================================================================

/// The one failure a transport can report.
///
/// Network errors, non-2xx statuses and undecodable bodies are all collapsed into this
/// opaque type. Only `message` is meant for humans; `status` is kept for diagnostics.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// A non-2xx response, e.g. `Http failure response for api/heroes/99: 404 Not Found`.
    pub fn status(url: &str, code: u16, reason: &str) -> Self {
        Self {
            message: format!("Http failure response for {url}: {code} {reason}"),
            status: Some(code),
        }
    }

    /// A body that could not be decoded into the expected shape.
    pub fn decode(error: impl Display) -> Self {
        Self::new(format!("Http failure during parsing: {error}"))
    }

    pub fn closed() -> Self {
        Self::new("Transport closed")
    }

    pub fn dropped() -> Self {
        Self::new("Transport dropped response channel")
    }
}

/// What a transport eventually yields: a JSON body, no body, or a failure.
pub type TransportResult = Result<Option<Value>, TransportError>;

// =============================================================================
// 3. THE COLLABORATORS
// =============================================================================

/// The injected HTTP collaborator.
///
/// Implementations perform exactly one exchange per call. Retrying, caching and
/// connection management are their own business and never orchestrated by callers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> TransportResult;
}

/// The injected log collector. Fire-and-forget; must tolerate concurrent callers.
pub trait MessageSink: Send + Sync {
    fn add(&self, message: String);
}

// =============================================================================
// 4. THE CHANNEL TRANSPORT
// =============================================================================

/// Type alias for the one-shot response channel used by backends.
pub type Response = oneshot::Sender<TransportResult>;

/// A request in flight between a [`ChannelTransport`] and whoever serves it.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: TransportRequest,
    pub respond_to: Response,
}

/// A [`Transport`] that hands each request to a serving task over an mpsc channel.
///
/// The in-memory backend and the test mocks both sit on the receiving end.
#[derive(Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<PendingRequest>,
}

impl ChannelTransport {
    pub fn new(sender: mpsc::Sender<PendingRequest>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest { request, respond_to })
            .await
            .map_err(|_| TransportError::closed())?;
        response.await.map_err(|_| TransportError::dropped())?
    }
}
