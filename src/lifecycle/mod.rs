//! Runtime orchestration and lifecycle management.
//!
//! This module wires the hero client to a backend and manages the pieces that run
//! alongside it:
//!
//! - **Backend lifecycle**: Starting and shutting down the in-memory heroes backend
//! - **Dependency wiring**: Handing the transport and message service to the client
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`HeroSystem`] - Runs a client against the in-memory backend
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod hero_system;
pub mod tracing;

pub use self::hero_system::*;
pub use self::tracing::*;
