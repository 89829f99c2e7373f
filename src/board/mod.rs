//! The soundboard itself: session state, filtering, the view model and
//! playback.

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod filter;
pub mod playback;
pub mod state;
pub mod view;
