//! Route handlers. Each returns an HTML fragment for HTMX to swap in.

pub mod filter;
pub mod play;
pub mod soundboard;
pub mod util;
