//! # Resource Client
//!
//! Typed JSON calls against one collection endpoint, built on top of a [`Transport`].
//!
//! Every failure (transport, status, decoding) comes back as a [`TransportError`];
//! this layer never absorbs errors. That is the job of the domain client above it.

use crate::framework::{Transport, TransportError, TransportRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// A generic client for one collection endpoint (e.g. `api/heroes`).
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl ResourceClient {
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// The collection endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `{endpoint}/{id}`
    pub fn item_url(&self, id: impl Display) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    /// `{endpoint}/?{field}={value}`
    pub fn query_url(&self, field: &str, value: impl Display) -> String {
        format!("{}/?{}={}", self.endpoint, field, value)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        let body = self.send(TransportRequest::get(url)).await?;
        decode(body)
    }

    pub async fn post<B, T>(&self, url: String, payload: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(TransportRequest::post(url, encode(payload)?).json()).await?;
        decode(body)
    }

    /// PUT responses vary by backend, so the raw payload is returned.
    pub async fn put<B>(&self, url: String, payload: &B) -> Result<Option<Value>, TransportError>
    where
        B: Serialize + ?Sized,
    {
        self.send(TransportRequest::put(url, encode(payload)?).json()).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        let body = self.send(TransportRequest::delete(url).json()).await?;
        decode(body)
    }

    async fn send(&self, request: TransportRequest) -> Result<Option<Value>, TransportError> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        self.transport.send(request).await
    }
}

fn encode<B: Serialize + ?Sized>(payload: &B) -> Result<Value, TransportError> {
    serde_json::to_value(payload).map_err(TransportError::decode)
}

/// A missing body decodes as JSON `null`, so `Option<T>` targets accept `204 No Content`.
fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, TransportError> {
    serde_json::from_value(body.unwrap_or(Value::Null)).map_err(TransportError::decode)
}
