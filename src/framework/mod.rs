//! Generic request plumbing for the hero client.
//!
//! This module provides the building blocks every operation is built from: the transport
//! contract, the single error kind, and the outcome normalizer that turns failures into
//! fallbacks.
//!
//! # Main Components
//!
//! - [`Transport`] - The injected HTTP collaborator
//! - [`MessageSink`] - The injected log collector
//! - [`Fallback`] - The outcome normalizer
//! - [`TransportError`] - The one failure kind
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without a real backend.

pub mod core;
pub mod mock;
pub mod outcome;

// Re-export core types for convenience
pub use self::core::*;
pub use self::outcome::Fallback;
