//! Pure data structures exchanged with the heroes collection.

pub mod hero;

pub use hero::*;
