//! Per-unit view model and its HTML fragment.
//!
//! The main action row always has four slots (Create, Select, Move, Attack),
//! matched case-insensitively against the unit's action keys. When several keys
//! differ only by case the first one in document order fills the slot and the
//! rest fall through to the "other actions" row, which keeps map order.

use serde_json::json;

use crate::board::state::DisplayMode;
use crate::config::SoundboardConfig;
use crate::data::model::{QuoteEntry, UnitRecord};
use crate::routes::util::escape_html;

pub const MAIN_ACTIONS: [&str; 4] = ["Create", "Select", "Move", "Attack"];

/// One canonical slot. `action` is the unit's actual key, if it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSlot<'a> {
    pub label: &'static str,
    pub action: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitView<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub faction: &'a str,
    pub unit_type: &'a str,
    pub icon: String,
    pub faction_icon: String,
    pub show_actions: bool,
    pub show_quotes: bool,
    /// Empty when actions are hidden.
    pub main_actions: Vec<ActionSlot<'a>>,
    pub other_actions: Vec<&'a str>,
    /// Empty when quotes are hidden.
    pub quotes: &'a [QuoteEntry],
}

/// First action key equal to `canonical` ignoring case.
pub fn find_action_ci<'a>(unit: &'a UnitRecord, canonical: &str) -> Option<&'a str> {
    unit.action_names()
        .find(|name| name.to_lowercase() == canonical.to_lowercase())
}

pub fn unit_view<'a>(
    unit: &'a UnitRecord,
    mode: DisplayMode,
    config: &SoundboardConfig,
) -> UnitView<'a> {
    let mut main_actions = Vec::new();
    let mut other_actions = Vec::new();
    if mode.shows_actions() {
        main_actions = MAIN_ACTIONS
            .iter()
            .map(|&label| ActionSlot {
                label,
                action: find_action_ci(unit, label),
            })
            .collect();
        other_actions = unit
            .action_names()
            .filter(|name| !main_actions.iter().any(|slot| slot.action == Some(*name)))
            .collect();
    }

    UnitView {
        code: &unit.code,
        name: &unit.display_name,
        faction: &unit.faction,
        unit_type: &unit.unit_type,
        icon: config.unit_icon(&unit.code),
        faction_icon: config.faction_icon(&unit.faction),
        show_actions: mode.shows_actions(),
        show_quotes: mode.shows_quotes(),
        main_actions,
        other_actions,
        quotes: if mode.shows_quotes() { &unit.quotes[..] } else { &[] },
    }
}

fn play_button(label: &str, vals: serde_json::Value) -> String {
    format!(
        r##"<button class="play-button" hx-post="/api/play" hx-vals="{vals}" hx-target="#play-status" hx-swap="innerHTML">{label}</button>"##,
        vals = escape_html(&vals.to_string()),
        label = escape_html(label),
    )
}

fn render_actions(view: &UnitView) -> String {
    let mut html = String::from(r#"<div class="main-actions">"#);
    for slot in &view.main_actions {
        match slot.action {
            Some(action) => html.push_str(&play_button(
                slot.label,
                json!({ "unit": view.code, "action": action }),
            )),
            None => html.push_str(&format!(
                r#"<button class="play-button empty" disabled>{}</button>"#,
                slot.label
            )),
        }
    }
    html.push_str("</div>");

    if !view.other_actions.is_empty() {
        html.push_str(r#"<div class="other-actions">"#);
        for action in &view.other_actions {
            html.push_str(&play_button(
                action,
                json!({ "unit": view.code, "action": action }),
            ));
        }
        html.push_str("</div>");
    }
    html
}

fn render_quotes(view: &UnitView) -> String {
    let mut html = String::from(r#"<div class="quotes">"#);
    for quote in view.quotes {
        html.push_str(&play_button(
            &quote.text,
            json!({ "unit": view.code, "quote": quote.clip_name }),
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_unit(view: &UnitView) -> String {
    let mut html = format!(
        r#"<section class="unit" data-unit="{code}">
  <header class="unit-header">
    <img class="unit-icon" src="{icon}" alt="{name}" loading="lazy" onerror="this.remove()">
    <h2>{name}</h2>
    <span class="unit-meta"><img class="faction-icon" src="{faction_icon}" alt="" loading="lazy" onerror="this.remove()">{faction} &middot; {unit_type}</span>
  </header>
"#,
        code = escape_html(view.code),
        icon = escape_html(&view.icon),
        name = escape_html(view.name),
        faction_icon = escape_html(&view.faction_icon),
        faction = escape_html(view.faction),
        unit_type = escape_html(view.unit_type),
    );
    if view.show_actions {
        html.push_str(&render_actions(view));
    }
    if view.show_quotes {
        html.push_str(&render_quotes(view));
    }
    html.push_str("</section>");
    html
}

pub fn render_grid(views: &[UnitView]) -> String {
    let mut html = String::with_capacity(views.len() * 1024);
    html.push_str(r#"<div class="soundboard-grid">"#);
    for view in views {
        html.push_str(&render_unit(view));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Sounds, VoiceEntry};

    fn entry() -> VoiceEntry {
        VoiceEntry {
            sounds: Sounds::List(vec!["x".into()]),
            volume_percent: None,
        }
    }

    fn unit_with(actions: &[&str]) -> UnitRecord {
        let mut unit = UnitRecord::synthesized("A");
        unit.display_name = "Alpha".into();
        unit.faction = "Red".into();
        unit.voices = actions.iter().map(|a| (a.to_string(), entry())).collect();
        unit.quotes = vec![QuoteEntry {
            text: "For <glory>!".into(),
            clip_name: "a_q1".into(),
        }];
        unit
    }

    #[test]
    fn main_slots_in_canonical_order_even_when_missing() {
        let unit = unit_with(&["Taunt", "attack", "SELECT", "Die"]);
        let view = unit_view(&unit, DisplayMode::All, &SoundboardConfig::default());
        let slots: Vec<(&str, Option<&str>)> =
            view.main_actions.iter().map(|s| (s.label, s.action)).collect();
        assert_eq!(
            slots,
            vec![
                ("Create", None),
                ("Select", Some("SELECT")),
                ("Move", None),
                ("Attack", Some("attack")),
            ]
        );
        assert_eq!(view.other_actions, vec!["Taunt", "Die"]);
    }

    #[test]
    fn case_duplicates_first_wins() {
        let unit = unit_with(&["select", "Select"]);
        let view = unit_view(&unit, DisplayMode::All, &SoundboardConfig::default());
        assert_eq!(view.main_actions[1].action, Some("select"));
        assert_eq!(view.other_actions, vec!["Select"]);
    }

    #[test]
    fn display_modes_hide_sections() {
        let unit = unit_with(&["Select"]);
        let config = SoundboardConfig::default();

        let actions = unit_view(&unit, DisplayMode::ActionsOnly, &config);
        assert!(actions.quotes.is_empty());
        assert_eq!(actions.main_actions.len(), 4);

        let quotes = unit_view(&unit, DisplayMode::QuotesOnly, &config);
        assert!(quotes.main_actions.is_empty());
        assert!(quotes.other_actions.is_empty());
        assert_eq!(quotes.quotes.len(), 1);

        let html = render_unit(&quotes);
        assert!(html.contains("class=\"quotes\""));
        assert!(!html.contains("main-actions"));
    }

    #[test]
    fn rendered_html_is_escaped_and_wired() {
        let unit = unit_with(&["Select"]);
        let view = unit_view(&unit, DisplayMode::All, &SoundboardConfig::default());
        let html = render_unit(&view);
        assert!(html.contains("For &lt;glory&gt;!"));
        assert!(html.contains(r#"hx-post="/api/play""#));
        assert!(html.contains("&quot;action&quot;:&quot;Select&quot;"));
        assert!(html.contains("&quot;quote&quot;:&quot;a_q1&quot;"));
        assert!(html.contains(r#"src="images/A.webp""#));
        assert!(html.contains(r#"src="images/faction_red.webp""#));
        assert!(html.contains(r#"<button class="play-button empty" disabled>Create</button>"#));
    }
}
