//! Source document loading: `voices.json`, `units.json`, `quotes.json`.
//!
//! Fetching happens concurrently in the browser. Parsing is plain Rust so the
//! all-or-nothing rules can be tested natively: any configured source that
//! fails makes the whole load fail with one aggregated error.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::model::{QuoteEntry, VoiceEntry};
use crate::error::LoadError;

/// One row of `units.json`. Everything except the code is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "Unit Code")]
    pub code: String,
    #[serde(rename = "Unit Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Faction", default)]
    pub faction: Option<String>,
    #[serde(rename = "Unit Type", default)]
    pub unit_type: Option<String>,
}

/// Parsed documents, ready for the joiner. Map-shaped documents keep their
/// key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocuments {
    pub roster: Vec<RosterEntry>,
    pub voices: Vec<(String, Vec<(String, VoiceEntry)>)>,
    pub quotes: Vec<(String, Vec<QuoteEntry>)>,
}

/// Fetch results per source. `None` marks a source that is not configured.
#[derive(Debug, Clone)]
pub struct SourceTexts {
    pub voices: (String, Result<String, LoadError>),
    pub units: Option<(String, Result<String, LoadError>)>,
    pub quotes: Option<(String, Result<String, LoadError>)>,
}

fn parse_object(name: &str, text: &str) -> Result<Map<String, Value>, LoadError> {
    match serde_json::from_str::<Value>(text).map_err(|e| LoadError::from_json(name, e))? {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::shape(name, "expected a JSON object at the top level")),
    }
}

/// `unit code -> action name -> { Sounds, Volume }`.
pub fn parse_voices(
    name: &str,
    text: &str,
) -> Result<Vec<(String, Vec<(String, VoiceEntry)>)>, LoadError> {
    parse_object(name, text)?
        .into_iter()
        .map(|(code, actions)| match actions {
            Value::Object(actions) => {
                let actions = actions
                    .iter()
                    .map(|(action, entry)| (action.clone(), VoiceEntry::from_value(entry)))
                    .collect();
                Ok((code, actions))
            }
            _ => Err(LoadError::shape(
                name,
                format!("unit \"{code}\" is not an object of actions"),
            )),
        })
        .collect()
}

pub fn parse_roster(name: &str, text: &str) -> Result<Vec<RosterEntry>, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::from_json(name, e))
}

/// `unit code -> [{ quote, file }]`.
pub fn parse_quotes(name: &str, text: &str) -> Result<Vec<(String, Vec<QuoteEntry>)>, LoadError> {
    parse_object(name, text)?
        .into_iter()
        .map(|(code, quotes)| {
            let quotes: Vec<QuoteEntry> =
                serde_json::from_value(quotes).map_err(|e| LoadError::from_json(name, e))?;
            Ok((code, quotes))
        })
        .collect()
}

/// Parse every source, collecting all failures rather than stopping at the first.
pub fn parse_sources(texts: SourceTexts) -> Result<RawDocuments, LoadError> {
    let mut errors = Vec::new();
    let mut docs = RawDocuments::default();

    let (name, voices) = texts.voices;
    match voices.and_then(|text| parse_voices(&name, &text)) {
        Ok(voices) => docs.voices = voices,
        Err(e) => errors.push(e),
    }

    if let Some((name, units)) = texts.units {
        match units.and_then(|text| parse_roster(&name, &text)) {
            Ok(roster) => docs.roster = roster,
            Err(e) => errors.push(e),
        }
    }

    if let Some((name, quotes)) = texts.quotes {
        match quotes.and_then(|text| parse_quotes(&name, &text)) {
            Ok(quotes) => docs.quotes = quotes,
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(docs)
    } else {
        Err(LoadError::Aggregate(errors))
    }
}

// ── Browser fetch ──────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
mod fetch {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use super::SourceTexts;
    use crate::config::SoundboardConfig;
    use crate::error::LoadError;
    use crate::logging::js_error_message;

    fn request_failed(url: &str, reason: impl Into<String>) -> LoadError {
        LoadError::Fetch {
            document: url.to_string(),
            reason: reason.into(),
        }
    }

    async fn fetch_text(url: &str) -> Result<String, LoadError> {
        let window = web_sys::window().ok_or_else(|| request_failed(url, "no window"))?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| request_failed(url, js_error_message(&e)))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| request_failed(url, "fetch did not return a Response"))?;
        if !response.ok() {
            return Err(LoadError::Status {
                document: url.to_string(),
                status: response.status(),
            });
        }
        let body = response
            .text()
            .map_err(|e| request_failed(url, js_error_message(&e)))?;
        let text = JsFuture::from(body)
            .await
            .map_err(|e| request_failed(url, js_error_message(&e)))?;
        text.as_string()
            .ok_or_else(|| request_failed(url, "response body was not text"))
    }

    async fn fetch_named(url: &str) -> (String, Result<String, LoadError>) {
        (url.to_string(), fetch_text(url).await)
    }

    async fn fetch_optional(url: Option<&str>) -> Option<(String, Result<String, LoadError>)> {
        match url {
            Some(url) => Some(fetch_named(url).await),
            None => None,
        }
    }

    /// Issue every configured request at once and wait for all of them.
    pub async fn fetch_sources(config: &SoundboardConfig) -> SourceTexts {
        log::debug!(
            "fetching {} (+ units: {:?}, quotes: {:?})",
            config.voices_url,
            config.units_url,
            config.quotes_url
        );
        let (voices, units, quotes) = futures::join!(
            fetch_named(&config.voices_url),
            fetch_optional(config.units_url.as_deref()),
            fetch_optional(config.quotes_url.as_deref()),
        );
        SourceTexts {
            voices,
            units,
            quotes,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use fetch::fetch_sources;
