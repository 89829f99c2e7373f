//! Source documents and the joined unit dataset.
//!
//! Loaded once at startup and read-only for the rest of the session.

pub mod join;
pub mod loader;
pub mod model;
