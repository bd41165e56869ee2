//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Two Log Channels
//!
//! The hero client reports on two channels that serve different readers:
//!
//! - The **message sink** ([`MessageService`](crate::messages::MessageService)) gets one
//!   human-readable line per operation, e.g. `HeroService: fetched hero id=12`.
//! - The **diagnostic channel** is `tracing`. Every failed operation emits exactly one
//!   `ERROR` event with `operation` and `error` fields; requests are traced at `DEBUG`
//!   and the in-memory backend logs at `INFO`/`WARN`.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Failures only
//! RUST_LOG=error cargo run
//!
//! # Backend activity
//! RUST_LOG=info cargo run
//!
//! # Every request with method and URL
//! RUST_LOG=debug cargo run
//!
//! # Filter to specific modules
//! RUST_LOG=hero_client::clients=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a failed lookup looks like:
//!
//! ```text
//! DEBUG get_hero{id=99}: Sending request method=GET url=api/heroes/99
//! WARN Rejected method=GET url=api/heroes/99 error=Http failure response for api/heroes/99: 404 Not Found
//! ERROR get_hero{id=99}: Request failed operation=getHero id=99 error=Http failure response for api/heroes/99: 404 Not Found
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
