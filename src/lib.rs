#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Hero Client
//!
//! > **A resilient client for a heroes collection.**
//!
//! This crate exposes create, read, search, update and delete over a single remote
//! collection (`api/heroes`). Every operation resolves to a value: a failed request
//! is logged and replaced with a fallback (an empty list, `None`) instead of being
//! returned as an error.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Succeed or Degrade
//!
//! Callers never handle transport errors. The only signal that something went wrong
//! is degraded data plus two log entries: one on the message sink the UI shows, one
//! on the `tracing` diagnostic channel. Each call is attempted exactly once; there is
//! no retry, no cache and no offline queue.
//!
//! ### Injected Collaborators
//!
//! The client owns no singletons. A [`Transport`](framework::Transport) (the HTTP
//! layer) and a [`MessageSink`](framework::MessageSink) (the log collector) are passed
//! to [`HeroClient::new`](clients::HeroClient::new). Swapping the real HTTP transport
//! for the in-memory backend or a mock changes nothing else.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. One Error Kind
//! Network errors, non-2xx statuses and undecodable bodies all become a
//! [`TransportError`](framework::TransportError). Below [`HeroClient`](clients::HeroClient)
//! they propagate with `?`; at the client they are absorbed by
//! [`Fallback`](framework::Fallback).
//!
//! ### 2. Concurrency Model
//! Every operation is a future yielding exactly one value. The client is `Clone` and
//! stateless, so any number of calls can be in flight. The in-memory backend is a
//! single Tokio task that processes requests sequentially, so its table needs no lock.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured fields. See the [`lifecycle::tracing`]
//! module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Plumbing ([`framework`])
//! - **Role**: The transport contract, the error type and the outcome normalizer.
//! - **Key items**: [`Transport`](framework::Transport), [`Fallback`](framework::Fallback).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: [`HeroClient`](clients::HeroClient), one method per operation, on top of
//!   the typed [`ResourceClient`](clients::ResourceClient).
//!
//! ### 3. The Backends ([`transport`], [`in_memory`])
//! - **Role**: A `reqwest` transport for real servers and an actor-backed in-memory one.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Wires a client to the in-memory backend and sets up tracing.
//! - **Key items**: [`HeroSystem`](lifecycle::HeroSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against the in-memory backend
//! RUST_LOG=info cargo run
//!
//! # Against a real server
//! HERO_API_BASE_URL=http://localhost:3000 cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod in_memory;
pub mod lifecycle;
pub mod messages;
pub mod model;
pub mod transport;
