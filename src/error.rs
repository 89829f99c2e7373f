//! Error taxonomy for data loading and per-click playback.
//!
//! Load errors are fatal to initialization. Playback errors are terminal for
//! the click that triggered them and nothing else.

use thiserror::Error;

/// Failure while fetching or parsing one of the source documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("{document}: request failed: {reason}")]
    Fetch { document: String, reason: String },
    #[error("{document}: HTTP {status}")]
    Status { document: String, status: u16 },
    #[error("{document}: invalid JSON: {reason}")]
    Parse { document: String, reason: String },
    #[error("{document}: unexpected document shape: {reason}")]
    Shape { document: String, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{} source(s) failed to load: {}", .0.len(), join_messages(.0))]
    Aggregate(Vec<LoadError>),
}

fn join_messages(errors: &[LoadError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoadError {
    /// Syntax errors are `Parse`; well-formed JSON of the wrong type is `Shape`.
    pub fn from_json(source: &str, err: serde_json::Error) -> Self {
        if err.is_data() {
            Self::shape(source, err.to_string())
        } else {
            LoadError::Parse {
                document: source.to_string(),
                reason: err.to_string(),
            }
        }
    }

    pub fn shape(source: &str, reason: impl Into<String>) -> Self {
        LoadError::Shape {
            document: source.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure to resolve or start a clip for a single button click.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("unit \"{unit}\" not found in sound data")]
    UnknownUnit { unit: String },
    #[error("action \"{action}\" not found for unit \"{unit}\"")]
    UnknownAction { unit: String, action: String },
    #[error("sounds for {unit} - {action} are missing or not a list")]
    MalformedData { unit: String, action: String },
    #[error("no valid sound files for {unit} - {action}")]
    NoPlayableClip { unit: String, action: String },
    #[error("error playing {clip}: {reason}")]
    PlaybackFailure { clip: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_lists_every_failure() {
        let err = LoadError::Aggregate(vec![
            LoadError::Status {
                document: "units.json".into(),
                status: 404,
            },
            LoadError::shape("voices.json", "expected an object"),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("2 source(s) failed"));
        assert!(msg.contains("units.json: HTTP 404"));
        assert!(msg.contains("voices.json: unexpected document shape"));
    }

    #[test]
    fn playback_errors_carry_context() {
        let err = PlaybackError::NoPlayableClip {
            unit: "A".into(),
            action: "Select".into(),
        };
        assert_eq!(err.to_string(), "no valid sound files for A - Select");
    }
}
