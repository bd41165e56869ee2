//! # Outcome Normalizer
//!
//! Turns a `Result<T, TransportError>` into a plain `T`.
//!
//! On success the value passes through untouched. On failure the error is recorded
//! exactly once on the diagnostic channel (`tracing::error!`) and once on the
//! [`MessageSink`] as `"{operation} failed: {message}"`, then the fallback is returned.
//! There is no retry: one failed attempt is final for that call.

use crate::framework::{MessageSink, TransportError};
use std::future::Future;
use tracing::error;

/// A named operation together with the value to hand back if it fails.
///
/// # Example
/// ```ignore
/// let heroes = Fallback::with_value("getHeroes", Vec::new())
///     .settle(&sink, fetch)
///     .await;
/// ```
#[derive(Debug, Clone)]
pub struct Fallback<T> {
    operation: String,
    value: Option<T>,
}

impl<T: Default> Fallback<T> {
    /// No explicit fallback; a failure resolves to `T::default()` (`None`, `[]`, ...).
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            value: None,
        }
    }

    pub fn with_value(operation: impl Into<String>, value: T) -> Self {
        Self {
            operation: operation.into(),
            value: Some(value),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Absorbs a settled outcome.
    pub fn recover(self, sink: &dyn MessageSink, outcome: Result<T, TransportError>) -> T {
        match outcome {
            Ok(value) => value,
            Err(e) => {
                error!(operation = %self.operation, error = %e, "Request failed");
                sink.add(format!("{} failed: {}", self.operation, e.message));
                self.value.unwrap_or_default()
            }
        }
    }

    /// Awaits `call` and absorbs its outcome. Never returns an error.
    pub async fn settle<F>(self, sink: &dyn MessageSink, call: F) -> T
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let outcome = call.await;
        self.recover(sink, outcome)
    }
}
