//! `GET /api/soundboard` and `GET /api/filters`: the button grid and the
//! filter panel, both rendered from the current session state.

use serde_json::json;

use crate::board::filter::{facets, visible_units};
use crate::board::state::{AppState, DisplayMode, FilterState, with_state};
use crate::board::view::{render_grid, unit_view};
use crate::config::SoundboardConfig;
use crate::routes::filter::apply_search_and_mode;
use crate::routes::util::{escape_html, parse_query};

fn render_notice(message: &str) -> String {
    format!(
        r#"<div class="soundboard-empty">{}</div>"#,
        escape_html(message)
    )
}

/// Full re-render of the grid. Every filter mutation ends here.
pub fn render_board(state: &AppState) -> String {
    let Some(dataset) = state.dataset.as_ref() else {
        return render_notice("Sound data is not loaded.");
    };
    let units = visible_units(dataset, &state.filter);
    if units.is_empty() {
        return render_notice("No units match the current filters.");
    }
    let views: Vec<_> = units
        .into_iter()
        .map(|unit| unit_view(unit, state.filter.display_mode, &state.config))
        .collect();
    let mut html = format!(
        r#"<div class="soundboard-count">{} of {} units</div>"#,
        views.len(),
        dataset.len()
    );
    html.push_str(&render_grid(&views));
    html
}

fn checkbox(kind: &str, value: &str, checked: bool, icon: Option<&str>) -> String {
    let icon = icon
        .map(|src| {
            format!(
                r#"<img class="faction-icon" src="{}" alt="" loading="lazy" onerror="this.remove()">"#,
                escape_html(src)
            )
        })
        .unwrap_or_default();
    let vals = json!({ "kind": kind, "value": value }).to_string();
    format!(
        r##"<label class="filter-option"><input type="checkbox" value="{value}"{checked} hx-post="/api/filter/toggle" hx-vals="{vals}" hx-target="#soundboard" hx-swap="innerHTML">{icon}{label}</label>"##,
        value = escape_html(value),
        checked = if checked { " checked" } else { "" },
        vals = escape_html(&vals),
        icon = icon,
        label = escape_html(value),
    )
}

fn mode_radio(mode: DisplayMode, current: DisplayMode) -> String {
    let label = match mode {
        DisplayMode::All => "All",
        DisplayMode::ActionsOnly => "Actions",
        DisplayMode::QuotesOnly => "Quotes",
    };
    format!(
        r##"<label class="filter-option"><input type="radio" name="mode" value="{value}"{checked} hx-post="/api/filter" hx-target="#soundboard" hx-swap="innerHTML">{label}</label>"##,
        value = mode.as_str(),
        checked = if mode == current { " checked" } else { "" },
        label = label,
    )
}

fn search_input(query: &str) -> String {
    format!(
        r##"<fieldset class="filter-group"><legend>Search</legend><input type="search" id="filter-search" name="search" value="{value}" placeholder="Name, faction, type or action" hx-post="/api/filter" hx-trigger="input changed delay:200ms, search" hx-target="#soundboard" hx-swap="innerHTML"></fieldset>"##,
        value = escape_html(query),
    )
}

pub(crate) fn render_filters(state: &AppState) -> String {
    let Some(dataset) = state.dataset.as_ref() else {
        return String::new();
    };
    let facet_values = facets(dataset);
    let filter: &FilterState = &state.filter;
    let config: &SoundboardConfig = &state.config;

    let mut html = search_input(&filter.search_query);
    html.push_str(r#"<fieldset class="filter-group"><legend>Faction</legend>"#);
    for faction in &facet_values.factions {
        let icon = config.faction_icon(faction);
        html.push_str(&checkbox(
            "faction",
            faction,
            filter.selected_factions.contains(faction),
            Some(&icon),
        ));
    }
    html.push_str("</fieldset>");

    html.push_str(r#"<fieldset class="filter-group"><legend>Unit Type</legend>"#);
    for unit_type in &facet_values.unit_types {
        html.push_str(&checkbox(
            "type",
            unit_type,
            filter.selected_unit_types.contains(unit_type),
            None,
        ));
    }
    html.push_str("</fieldset>");

    html.push_str(r#"<fieldset class="filter-group"><legend>Show</legend>"#);
    for mode in [
        DisplayMode::All,
        DisplayMode::ActionsOnly,
        DisplayMode::QuotesOnly,
    ] {
        html.push_str(&mode_radio(mode, filter.display_mode));
    }
    html.push_str("</fieldset>");
    html
}

/// Grid followed by the filter panel as an out-of-band swap into `#filters`,
/// so the checkboxes always mirror the server-side selection.
pub fn render_board_with_panel(state: &AppState) -> String {
    let mut html = render_board(state);
    let panel = render_filters(state);
    if !panel.is_empty() {
        html.push_str(r##"<div hx-swap-oob="innerHTML:#filters">"##);
        html.push_str(&panel);
        html.push_str("</div>");
    }
    html
}

// ── GET /api/soundboard ────────────────────────────────────────────

/// Query params (each optional): ?search={text}&mode=all|actions|quotes
pub fn handle_get(query: &str) -> String {
    if let Err(html) = apply_search_and_mode(&parse_query(query)) {
        return html;
    }
    with_state(render_board)
}

// ── GET /api/filters ───────────────────────────────────────────────

/// Same query params as `GET /api/soundboard`, applied before rendering.
pub fn handle_filters_get(query: &str) -> String {
    if let Err(html) = apply_search_and_mode(&parse_query(query)) {
        return html;
    }
    with_state(render_filters)
}
