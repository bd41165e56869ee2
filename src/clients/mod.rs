//! Clients for the heroes collection.
//!
//! [`ResourceClient`] speaks typed JSON to a collection endpoint and reports every
//! failure. [`HeroClient`] wraps it with one method per hero operation and never does.

pub mod hero_client;
pub mod resource_client;

pub use hero_client::*;
pub use resource_client::*;
