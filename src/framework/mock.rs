//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_transport`] to get a transport and a receiver.
//! Then use [`expect_request`] to pull the next request and answer it by hand.
//! For a more fluent API, use [`MockTransport`] with expectation builders.
//! [`capture_diagnostics`] counts the `ERROR` events emitted on the diagnostic channel.

use crate::framework::{
    ChannelTransport, Method, PendingRequest, Response, TransportError, TransportRequest,
    TransportResult,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response the mock should give it.
struct Expectation {
    method: Method,
    url: String,
    response: TransportResult,
}

/// A mock transport with expectation tracking for fluent testing.
///
/// Requests are answered in the order expectations were registered. Every request
/// is recorded, including ones that matched nothing, so tests can assert how many
/// calls were made and what they looked like.
///
/// # Example
/// ```ignore
/// let mut mock = MockTransport::new();
/// mock.expect_get("api/heroes/11").return_ok(json!({"id": 11, "name": "Dr Nice"}));
/// mock.expect_delete("api/heroes/11").return_err(TransportError::new("offline"));
///
/// let transport = mock.transport();
/// // Use transport in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockTransport {
    transport: ChannelTransport,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<TransportRequest>>>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<PendingRequest>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::<Expectation>::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));

        let expectations_clone = expectations.clone();
        let received_clone = received.clone();
        let mismatches_clone = mismatches.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(PendingRequest { request, respond_to }) = receiver.recv().await {
                received_clone.lock().unwrap().push(request.clone());
                let expectation = expectations_clone.lock().unwrap().pop_front();

                let response = match expectation {
                    Some(exp) if exp.method == request.method && exp.url == request.url => exp.response,
                    Some(exp) => {
                        mismatches_clone.lock().unwrap().push(format!(
                            "expected {} {}, got {} {}",
                            exp.method, exp.url, request.method, request.url
                        ));
                        Err(TransportError::new("unexpected request"))
                    }
                    None => {
                        mismatches_clone
                            .lock()
                            .unwrap()
                            .push(format!("unexpected {} {}", request.method, request.url));
                        Err(TransportError::new("unexpected request"))
                    }
                };
                let _ = respond_to.send(response);
            }
        });

        Self {
            transport: ChannelTransport::new(sender),
            expectations,
            received,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the transport for use in tests.
    pub fn transport(&self) -> ChannelTransport {
        self.transport.clone()
    }

    /// Expects a request with the given method and URL.
    pub fn expect(&mut self, method: Method, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, url)
    }

    pub fn expect_post(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, url)
    }

    pub fn expect_put(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, url)
    }

    pub fn expect_delete(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, url)
    }

    /// Every request the mock has seen, in arrival order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Mismatched requests: {:?}", *mismatches);
        }
        let remaining = self.expectations.lock().unwrap();
        if !remaining.is_empty() {
            let pending: Vec<String> = remaining.iter().map(|e| format!("{} {}", e.method, e.url)).collect();
            panic!("Unmet expectations: {:?}", pending);
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a JSON body.
    pub fn return_ok(self, body: Value) {
        self.respond(Ok(Some(body)));
    }

    /// Sets the expectation to succeed without a body (e.g. `204 No Content`).
    pub fn return_empty(self) {
        self.respond(Ok(None));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.respond(Err(error));
    }

    fn respond(self, response: TransportResult) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a channel transport and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of scripting responses up front, the test plays the backend: it pulls each
/// request off the `receiver`, inspects it, and answers through the oneshot responder.
/// This makes it easy to hold several calls in flight at once.
pub fn create_mock_transport(buffer_size: usize) -> (ChannelTransport, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelTransport::new(sender), receiver)
}

/// Helper to pull the next request off the channel.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingRequest>,
) -> Option<(TransportRequest, Response)> {
    receiver
        .recv()
        .await
        .map(|PendingRequest { request, respond_to }| (request, respond_to))
}

// =============================================================================
// DIAGNOSTIC CAPTURE
// =============================================================================

/// A tracing layer that records every `ERROR` event's `operation` field.
#[derive(Clone, Default)]
pub struct DiagnosticCounter {
    operations: Arc<Mutex<Vec<String>>>,
}

impl DiagnosticCounter {
    pub fn count(&self) -> usize {
        self.operations.lock().unwrap().len()
    }

    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct OperationVisitor(String);

impl Visit for OperationVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "operation" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "operation" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for DiagnosticCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            let mut visitor = OperationVisitor::default();
            event.record(&mut visitor);
            self.operations.lock().unwrap().push(visitor.0);
        }
    }
}

/// Installs a [`DiagnosticCounter`] as the thread's default subscriber.
///
/// Keep the guard alive for the duration of the test. Works with the default
/// current-thread `#[tokio::test]` runtime.
pub fn capture_diagnostics() -> (DiagnosticCounter, DefaultGuard) {
    let counter = DiagnosticCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (counter, guard)
}
