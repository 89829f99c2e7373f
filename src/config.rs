//! Host-provided configuration, passed to `boot` as a JSON string.
//!
//! Every field has a default so `""` or `{}` yields the stock layout:
//! `voices.json`, `units.json`, `quotes.json` next to the page, clips under
//! `sounds/*.wav` and icons under `images/*.webp`.

use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SoundboardConfig {
    /// Voice-line map. Always fetched.
    pub voices_url: String,
    /// Unit roster. `null` disables the source.
    pub units_url: Option<String>,
    /// Quote map. `null` disables the source.
    pub quotes_url: Option<String>,
    pub sounds_dir: String,
    pub sound_extension: String,
    pub images_dir: String,
    pub image_extension: String,
    pub log_level: String,
}

impl Default for SoundboardConfig {
    fn default() -> Self {
        Self {
            voices_url: "voices.json".to_string(),
            units_url: Some("units.json".to_string()),
            quotes_url: Some("quotes.json".to_string()),
            sounds_dir: "sounds".to_string(),
            sound_extension: "wav".to_string(),
            images_dir: "images".to_string(),
            image_extension: "webp".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl SoundboardConfig {
    /// Parse the host's config string. Blank input means all defaults.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| LoadError::Config(e.to_string()))
    }

    /// Resource path of an audio clip, e.g. `sounds/s1.wav`.
    pub fn clip_path(&self, base_name: &str) -> String {
        format!("{}/{}.{}", self.sounds_dir, base_name, self.sound_extension)
    }

    /// Icon path for a unit, e.g. `images/A.webp`.
    pub fn unit_icon(&self, code: &str) -> String {
        format!("{}/{}.{}", self.images_dir, code, self.image_extension)
    }

    /// Icon path for a faction, e.g. `images/faction_red.webp`.
    pub fn faction_icon(&self, faction: &str) -> String {
        format!(
            "{}/faction_{}.{}",
            self.images_dir,
            faction.to_lowercase(),
            self.image_extension
        )
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
