//! `/api/filter/*` routes: mutate the filter state, then return the re-rendered
//! grid plus an out-of-band copy of the filter panel.

use crate::board::state::{DisplayMode, FacetKind, FilterState, with_state, with_state_mut};
use crate::routes::soundboard::render_board_with_panel;
use crate::routes::util::{error_span, get_param, parse_form_body};

/// Apply optional `search` and `mode` params. Absent fields are left unchanged.
/// An unknown mode rejects the whole update and returns the error fragment.
pub(crate) fn apply_search_and_mode(params: &[(String, String)]) -> Result<(), String> {
    let mode = match get_param(params, "mode") {
        Some(raw) => match DisplayMode::parse(raw) {
            Some(mode) => Some(mode),
            None => {
                log::warn!("ignoring unknown display mode {raw:?}");
                return Err(error_span(&format!("Unknown display mode: {raw}")));
            }
        },
        None => None,
    };
    let search = get_param(params, "search").map(str::to_string);

    with_state_mut(|s| {
        if let Some(search) = search {
            s.filter.search_query = search;
        }
        if let Some(mode) = mode {
            s.filter.display_mode = mode;
        }
    });
    Ok(())
}

// ── POST /api/filter ───────────────────────────────────────────────

/// Body params (each optional):
///   - search={text}
///   - mode=all|actions|quotes
pub fn handle_filter_post(body: &str) -> String {
    let params = parse_form_body(body);
    if let Err(html) = apply_search_and_mode(&params) {
        return html;
    }
    with_state(render_board_with_panel)
}

// ── POST /api/filter/toggle ────────────────────────────────────────

/// Body params: kind=faction|type&value={name}
pub fn handle_toggle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(kind) = get_param(&params, "kind").and_then(FacetKind::parse) else {
        return error_span("Missing or invalid kind parameter");
    };
    let value = match get_param(&params, "value") {
        Some(v) if !v.is_empty() => v,
        _ => return error_span("Missing value parameter"),
    };
    with_state_mut(|s| s.filter.toggle(kind, value));
    with_state(render_board_with_panel)
}

// ── POST /api/filter/clear ─────────────────────────────────────────

pub fn handle_clear_post(_body: &str) -> String {
    with_state_mut(|s| s.filter = FilterState::default());
    with_state(render_board_with_panel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::{AppState, replace_state};
    use crate::routes::soundboard::tests::install_sample;

    #[test]
    fn search_narrows_the_grid() {
        install_sample();
        let html = handle_filter_post("search=alp");
        assert!(html.contains("<h2>Alpha</h2>"));
        assert!(!html.contains("<h2>Bravo</h2>"));
        with_state(|s| assert_eq!(s.filter.search_query, "alp"));
        replace_state(AppState::default());
    }

    #[test]
    fn mode_change_keeps_search() {
        install_sample();
        handle_filter_post("search=alp");
        let html = handle_filter_post("mode=quotes");
        with_state(|s| {
            assert_eq!(s.filter.search_query, "alp");
            assert_eq!(s.filter.display_mode, DisplayMode::QuotesOnly);
        });
        assert!(!html.contains("main-actions"));
        replace_state(AppState::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        install_sample();
        let html = handle_filter_post("mode=loud");
        assert!(html.contains("Unknown display mode"));
        with_state(|s| assert_eq!(s.filter.display_mode, DisplayMode::All));
        replace_state(AppState::default());
    }

    #[test]
    fn toggle_faction_twice_restores_everything() {
        install_sample();
        let html = handle_toggle_post("kind=faction&value=Blue");
        assert!(html.contains("<h2>Bravo</h2>"));
        assert!(!html.contains("<h2>Alpha</h2>"));
        let html = handle_toggle_post("kind=faction&value=Blue");
        assert!(html.contains("<h2>Alpha</h2>"));
        assert!(html.contains("<h2>Bravo</h2>"));
        replace_state(AppState::default());
    }

    #[test]
    fn toggle_type_filters_units() {
        install_sample();
        let html = handle_toggle_post("kind=type&value=Tank");
        assert!(html.contains("<h2>Alpha</h2>"));
        assert!(!html.contains("<h2>Bravo</h2>"));
        replace_state(AppState::default());
    }

    #[test]
    fn toggle_requires_kind_and_value() {
        install_sample();
        assert!(handle_toggle_post("value=Red").contains("invalid kind"));
        assert!(handle_toggle_post("kind=faction").contains("Missing value"));
        replace_state(AppState::default());
    }

    #[test]
    fn clear_resets_filter() {
        install_sample();
        handle_filter_post("search=zzz&mode=actions");
        handle_clear_post("");
        with_state(|s| assert_eq!(s.filter, FilterState::default()));
        replace_state(AppState::default());
    }

    #[test]
    fn clear_after_toggle_returns_unchecked_panel() {
        install_sample();
        let html = handle_toggle_post("kind=faction&value=Red");
        assert!(html.contains(r##"hx-swap-oob="innerHTML:#filters""##));
        assert!(html.contains(r#"value="Red" checked"#));

        let html = handle_clear_post("");
        assert!(html.contains(r##"hx-swap-oob="innerHTML:#filters""##));
        assert!(html.contains("filter-group"));
        assert!(!html.contains(r#"value="Red" checked"#));
        assert!(html.contains(r#"value="Red" hx-post"#));
        assert!(html.contains(r#"value="all" checked"#));
        replace_state(AppState::default());
    }

    #[test]
    fn panel_follows_mode_and_search_changes() {
        install_sample();
        let html = handle_filter_post("search=alp&mode=quotes");
        assert!(html.contains(r#"value="quotes" checked"#));
        assert!(!html.contains(r#"value="all" checked"#));
        assert!(html.contains(r#"name="search" value="alp""#));
        replace_state(AppState::default());
    }

    #[test]
    fn rejected_mode_does_not_touch_the_panel() {
        install_sample();
        let html = handle_filter_post("mode=loud");
        assert!(!html.contains("hx-swap-oob"));
        replace_state(AppState::default());
    }
}
