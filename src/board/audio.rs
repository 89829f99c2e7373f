//! Browser audio sink. One `HtmlAudioElement` per request, so clicks overlap.

use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::board::playback::{AudioSink, PlaybackRequest};
use crate::error::PlaybackError;
use crate::logging::js_error_message;

pub struct HtmlAudioSink;

fn failure(request: &PlaybackRequest, err: &wasm_bindgen::JsValue) -> PlaybackError {
    PlaybackError::PlaybackFailure {
        clip: request.path.clone(),
        reason: js_error_message(err),
    }
}

impl AudioSink for HtmlAudioSink {
    fn play(&self, request: &PlaybackRequest) -> Result<(), PlaybackError> {
        let audio = HtmlAudioElement::new_with_src(&request.path).map_err(|e| failure(request, &e))?;
        audio.set_volume(request.volume);
        let promise = audio.play().map_err(|e| failure(request, &e))?;

        // Decode and 404 errors arrive as a rejected promise after we return.
        let clip = request.path.clone();
        let context = format!(
            "{} - {}",
            request.unit,
            request.action.as_deref().unwrap_or("quote")
        );
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                let err = PlaybackError::PlaybackFailure {
                    clip,
                    reason: js_error_message(&err),
                };
                log::error!("{context}: {err}");
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn play_returns_before_the_clip_loads() {
        let request = PlaybackRequest {
            unit: "A".into(),
            action: Some("Select".into()),
            clip: "missing".into(),
            path: "sounds/missing.wav".into(),
            volume: 0.5,
        };
        // The 404 surfaces later as a rejected promise, not as an error here.
        assert!(HtmlAudioSink.play(&request).is_ok());
    }
}
