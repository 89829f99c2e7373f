//! Session state container.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The dataset is installed once by `boot`; the filter is mutated by
//! the filter routes and every mutation is followed by a full re-render.

use std::cell::RefCell;
use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::playback::{AudioSink, default_sink};
use crate::config::SoundboardConfig;
use crate::data::model::JoinedDataset;

/// Which buttons each unit card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    All,
    ActionsOnly,
    QuotesOnly,
}

impl DisplayMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "actions" => Some(Self::ActionsOnly),
            "quotes" => Some(Self::QuotesOnly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ActionsOnly => "actions",
            Self::QuotesOnly => "quotes",
        }
    }

    pub fn shows_actions(self) -> bool {
        self != Self::QuotesOnly
    }

    pub fn shows_quotes(self) -> bool {
        self != Self::ActionsOnly
    }
}

/// User-controlled view filter. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_query: String,
    pub selected_factions: BTreeSet<String>,
    pub selected_unit_types: BTreeSet<String>,
    pub display_mode: DisplayMode,
}

/// Which categorical filter a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Faction,
    UnitType,
}

impl FacetKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "faction" => Some(Self::Faction),
            "type" => Some(Self::UnitType),
            _ => None,
        }
    }
}

impl FilterState {
    /// Add the value if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, kind: FacetKind, value: &str) -> bool {
        let set = match kind {
            FacetKind::Faction => &mut self.selected_factions,
            FacetKind::UnitType => &mut self.selected_unit_types,
        };
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }
}

pub struct AppState {
    pub config: SoundboardConfig,
    /// `None` until every source has loaded.
    pub dataset: Option<JoinedDataset>,
    pub filter: FilterState,
    pub rng: StdRng,
    pub sink: Box<dyn AudioSink>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: SoundboardConfig::default(),
            dataset: None,
            filter: FilterState::default(),
            rng: StdRng::from_entropy(),
            sink: default_sink(),
        }
    }
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Execute a closure with read access to the session state.
pub fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session state.
pub fn with_state_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the entire session state.
pub fn replace_state(new_state: AppState) {
    STATE.with(|s| {
        *s.borrow_mut() = new_state;
    });
}

/// Install a freshly joined dataset and reset the filter.
pub fn install_dataset(config: SoundboardConfig, dataset: JoinedDataset) {
    with_state_mut(|s| {
        s.config = config;
        s.dataset = Some(dataset);
        s.filter = FilterState::default();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UnitRecord;

    #[test]
    fn default_state_has_no_dataset() {
        replace_state(AppState::default());
        with_state(|s| {
            assert!(s.dataset.is_none());
            assert_eq!(s.filter, FilterState::default());
            assert_eq!(s.filter.display_mode, DisplayMode::All);
        });
    }

    #[test]
    fn install_resets_filter() {
        replace_state(AppState::default());
        with_state_mut(|s| s.filter.search_query = "alp".into());
        let mut data = JoinedDataset::default();
        data.insert(UnitRecord::synthesized("A"));
        install_dataset(SoundboardConfig::default(), data);
        with_state(|s| {
            assert_eq!(s.dataset.as_ref().map(JoinedDataset::len), Some(1));
            assert!(s.filter.search_query.is_empty());
        });
        replace_state(AppState::default());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut filter = FilterState::default();
        assert!(filter.toggle(FacetKind::Faction, "Red"));
        assert!(filter.selected_factions.contains("Red"));
        assert!(!filter.toggle(FacetKind::Faction, "Red"));
        assert!(filter.selected_factions.is_empty());
        assert!(filter.toggle(FacetKind::UnitType, "Tank"));
        assert!(filter.selected_unit_types.contains("Tank"));
    }

    #[test]
    fn display_mode_parsing() {
        assert_eq!(DisplayMode::parse("Quotes"), Some(DisplayMode::QuotesOnly));
        assert_eq!(DisplayMode::parse("actions"), Some(DisplayMode::ActionsOnly));
        assert_eq!(DisplayMode::parse("all").map(DisplayMode::as_str), Some("all"));
        assert_eq!(DisplayMode::parse("both"), None);
        assert!(!DisplayMode::QuotesOnly.shows_actions());
        assert!(!DisplayMode::ActionsOnly.shows_quotes());
        assert!(DisplayMode::All.shows_actions() && DisplayMode::All.shows_quotes());
    }
}
