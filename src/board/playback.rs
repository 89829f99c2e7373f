//! Playback trigger: resolve a click to one clip and hand it to an audio sink.
//!
//! The random source and the sink are injected so selection is testable.
//! Requests are fire-and-forget; overlapping playback is allowed and nothing
//! is queued, capped or cancelled.

use rand::Rng;

use crate::config::SoundboardConfig;
use crate::data::model::JoinedDataset;
use crate::error::PlaybackError;

/// A fully resolved clip, ready for the media layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub unit: String,
    /// `None` for quote playback.
    pub action: Option<String>,
    pub clip: String,
    pub path: String,
    /// In [0, 1].
    pub volume: f64,
}

/// Where resolved clips go. The browser implementation starts an audio element.
pub trait AudioSink {
    fn play(&self, request: &PlaybackRequest) -> Result<(), PlaybackError>;
}

/// Sink for targets without a media layer. Logs and succeeds.
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, request: &PlaybackRequest) -> Result<(), PlaybackError> {
        log::debug!("no audio backend, dropping {}", request.path);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_sink() -> Box<dyn AudioSink> {
    Box::new(crate::board::audio::HtmlAudioSink)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_sink() -> Box<dyn AudioSink> {
    Box::new(NullSink)
}

/// Resolve `unit`/`action` to a single randomly chosen clip.
pub fn resolve_action<R: Rng + ?Sized>(
    dataset: &JoinedDataset,
    config: &SoundboardConfig,
    unit: &str,
    action: &str,
    rng: &mut R,
) -> Result<PlaybackRequest, PlaybackError> {
    let record = dataset.get(unit).ok_or_else(|| PlaybackError::UnknownUnit {
        unit: unit.to_string(),
    })?;
    let entry = record
        .action(action)
        .ok_or_else(|| PlaybackError::UnknownAction {
            unit: unit.to_string(),
            action: action.to_string(),
        })?;
    let sounds = entry
        .playable_sounds()
        .ok_or_else(|| PlaybackError::MalformedData {
            unit: unit.to_string(),
            action: action.to_string(),
        })?;
    if sounds.is_empty() {
        return Err(PlaybackError::NoPlayableClip {
            unit: unit.to_string(),
            action: action.to_string(),
        });
    }

    let clip = sounds[rng.gen_range(0..sounds.len())];
    Ok(PlaybackRequest {
        unit: unit.to_string(),
        action: Some(action.to_string()),
        clip: clip.to_string(),
        path: config.clip_path(clip),
        volume: entry.volume(),
    })
}

/// A quote names its clip directly and always plays at full volume.
pub fn resolve_quote(
    config: &SoundboardConfig,
    unit: &str,
    clip: &str,
) -> Result<PlaybackRequest, PlaybackError> {
    let clip = clip.trim();
    if clip.is_empty() {
        return Err(PlaybackError::NoPlayableClip {
            unit: unit.to_string(),
            action: "quote".to_string(),
        });
    }
    Ok(PlaybackRequest {
        unit: unit.to_string(),
        action: None,
        clip: clip.to_string(),
        path: config.clip_path(clip),
        volume: 1.0,
    })
}

/// Resolve and start an action clip.
pub fn play_action<R: Rng + ?Sized>(
    dataset: &JoinedDataset,
    config: &SoundboardConfig,
    unit: &str,
    action: &str,
    rng: &mut R,
    sink: &dyn AudioSink,
) -> Result<PlaybackRequest, PlaybackError> {
    let request = resolve_action(dataset, config, unit, action, rng)?;
    sink.play(&request)?;
    log::debug!("playing {} at volume {}", request.path, request.volume);
    Ok(request)
}

/// Resolve and start a quote clip.
pub fn play_quote(
    config: &SoundboardConfig,
    unit: &str,
    clip: &str,
    sink: &dyn AudioSink,
) -> Result<PlaybackRequest, PlaybackError> {
    let request = resolve_quote(config, unit, clip)?;
    sink.play(&request)?;
    log::debug!("playing quote {}", request.path);
    Ok(request)
}
