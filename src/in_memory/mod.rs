//! An in-memory heroes backend.
//!
//! Serves the same wire contract a real server would (`GET`, `POST`, `PUT`, `DELETE`
//! under `api/heroes`) from a table owned by a single actor task. Used by the demo
//! binary and by end-to-end tests.

pub mod actor;
pub mod routes;

pub use actor::*;

use crate::clients::HEROES_URL;
use crate::framework::ChannelTransport;
use crate::model::Hero;

/// Creates a backend seeded with [`seed_heroes`] and the transport that talks to it.
pub fn new() -> (HeroStoreActor, ChannelTransport) {
    HeroStoreActor::new(32, HEROES_URL, seed_heroes())
}

/// The starting roster.
pub fn seed_heroes() -> Vec<Hero> {
    [
        (12, "Dr. Nice"),
        (13, "Bombasto"),
        (14, "Celeritas"),
        (15, "Magneta"),
        (16, "RubberMan"),
        (17, "Dynama"),
        (18, "Dr. IQ"),
        (19, "Magma"),
        (20, "Tornado"),
    ]
    .into_iter()
    .map(|(id, name)| Hero::new(id, name))
    .collect()
}
