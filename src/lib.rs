//! Soundboard in-browser WASM server.
//!
//! `boot(config)` fetches the voice, roster and quote documents, joins them and
//! keeps the result in WASM memory for the page session. After that the page
//! calls `handle_request(method, path, query, body)` for every HTMX request and
//! swaps the returned HTML fragment into the DOM. Routing uses `matchit`.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod routes;

use crate::config::SoundboardConfig;
use crate::data::loader::{SourceTexts, parse_sources};
use crate::error::LoadError;

/// Process an HTTP-like request and return an HTML fragment.
///
/// # Arguments
/// * `method`: HTTP method ("GET" or "POST")
/// * `path`: URL path (e.g., "/api/soundboard")
/// * `query`: Query string, may be empty
/// * `body`: Form-encoded request body. Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/soundboard", "soundboard").ok();
    router.insert("/api/filters", "filters").ok();
    router.insert("/api/filter", "filter").ok();
    router.insert("/api/filter/toggle", "filter_toggle").ok();
    router.insert("/api/filter/clear", "filter_clear").ok();
    router.insert("/api/play", "play").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("soundboard", "GET") => routes::soundboard::handle_get(query),
            ("filters", "GET") => routes::soundboard::handle_filters_get(query),

            ("filter", "POST") => routes::filter::handle_filter_post(body),
            ("filter_toggle", "POST") => routes::filter::handle_toggle_post(body),
            ("filter_clear", "POST") => routes::filter::handle_clear_post(body),
            ("play", "POST") => routes::play::handle_play_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-error">404: route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-error">405: method not allowed</span>"#.to_string()
}

/// Parse and join fetched sources, then install them as the session dataset.
/// Returns the number of units loaded. On error the state is left untouched.
pub fn install_sources(config: SoundboardConfig, texts: SourceTexts) -> Result<usize, LoadError> {
    let docs = parse_sources(texts)?;
    let dataset = data::join::join(docs);
    let count = dataset.len();
    board::state::install_dataset(config, dataset);
    Ok(count)
}

/// Initialize logging, fetch every configured source and install the dataset.
///
/// Rejects with the aggregated load error if any source fails; the page then
/// stays in its empty state.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn boot(config_json: String) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = match SoundboardConfig::from_json(&config_json) {
        Ok(config) => config,
        Err(err) => {
            logging::init(log::LevelFilter::Info);
            log::error!("initialization failed: {err}");
            return Err(JsValue::from_str(&err.to_string()));
        }
    };
    logging::init(config.level_filter());

    let texts = data::loader::fetch_sources(&config).await;
    match install_sources(config, texts) {
        Ok(count) => {
            log::info!("loaded {count} units");
            Ok(())
        }
        Err(err) => {
            log::error!("initialization failed: {err}");
            Err(JsValue::from_str(&err.to_string()))
        }
    }
}
