//! `POST /api/play`: start a clip for one button click.
//!
//! Reads the joined dataset directly; the current filter is irrelevant here.
//! Returns an empty fragment on success so the status area clears, or an
//! error span. Failures are logged with unit + action and never affect later
//! clicks.

use crate::board::playback::{play_action, play_quote};
use crate::board::state::{AppState, with_state_mut};
use crate::data::model::JoinedDataset;
use crate::routes::util::{error_span, get_param, parse_form_body};

/// Body params:
///   - unit={code}&action={name}   → random clip from the action's pool
///   - unit={code}&quote={clip}    → the named quote clip
pub fn handle_play_post(body: &str) -> String {
    let params = parse_form_body(body);
    let unit = get_param(&params, "unit").unwrap_or("");
    let action = get_param(&params, "action");
    let quote = get_param(&params, "quote");

    with_state_mut(|state| {
        let AppState {
            config,
            dataset,
            rng,
            sink,
            ..
        } = state;
        let empty = JoinedDataset::default();
        let dataset = dataset.as_ref().unwrap_or(&empty);

        let (label, result) = match (action, quote) {
            (Some(action), _) => (
                action,
                play_action(dataset, config, unit, action, rng, &**sink),
            ),
            (None, Some(clip)) => ("quote", play_quote(config, unit, clip, &**sink)),
            (None, None) => return error_span("Missing action or quote parameter"),
        };

        match result {
            Ok(_) => String::new(),
            Err(err) => {
                log::warn!("playback failed for {unit} - {label}: {err}");
                error_span(&err.to_string())
            }
        }
    })
}
