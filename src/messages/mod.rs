//! The log collector the hero client reports into.
//!
//! [`MessageService`] keeps every message in arrival order so a UI (or a test) can
//! show what happened. [`ScopedSink`] prefixes messages with the name of whoever
//! is writing them.

use crate::framework::MessageSink;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A thread-safe, append-only list of messages.
#[derive(Debug, Default)]
pub struct MessageService {
    messages: Mutex<Vec<String>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the messages collected so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // Poisoning is ignored: a Vec<String> is valid after any panic.
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageSink for MessageService {
    fn add(&self, message: String) {
        self.lock().push(message);
    }
}

/// Forwards to another sink with a fixed `"{prefix}: "` in front of every message.
#[derive(Clone)]
pub struct ScopedSink {
    prefix: &'static str,
    inner: Arc<dyn MessageSink>,
}

impl ScopedSink {
    pub fn new(prefix: &'static str, inner: Arc<dyn MessageSink>) -> Self {
        Self { prefix, inner }
    }
}

impl MessageSink for ScopedSink {
    fn add(&self, message: String) {
        self.inner.add(format!("{}: {}", self.prefix, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_arrival_order() {
        let service = MessageService::new();
        service.add("first".into());
        service.add("second".into());

        assert_eq!(service.messages(), vec!["first", "second"]);
        service.clear();
        assert!(service.is_empty());
    }

    #[test]
    fn test_scoped_sink_prefixes() {
        let service = Arc::new(MessageService::new());
        let scoped = ScopedSink::new("HeroService", service.clone());

        scoped.add("fetched heroes".into());

        assert_eq!(service.messages(), vec!["HeroService: fetched heroes"]);
    }

    #[test]
    fn test_concurrent_adds_are_all_kept() {
        let service = Arc::new(MessageService::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || service.add(format!("message {i}")))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.len(), 8);
    }
}
