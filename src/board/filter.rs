//! Visible-unit computation and filter facets.
//!
//! A unit is shown when every active predicate passes. Empty faction/type
//! selections do not restrict. The search query is a case-insensitive
//! substring match against name + faction + type, or against any action name.

use feruca::Collator;

use crate::board::state::FilterState;
use crate::data::model::{JoinedDataset, UnitRecord};

/// Lowercased haystack for the unit-level search.
fn unit_haystack(unit: &UnitRecord) -> String {
    format!("{}{}{}", unit.display_name, unit.faction, unit.unit_type).to_lowercase()
}

/// `query` must already be trimmed and lowercased.
fn matches_search(unit: &UnitRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    unit_haystack(unit).contains(query)
        || unit
            .action_names()
            .any(|action| action.to_lowercase().contains(query))
}

fn matches_facets(unit: &UnitRecord, filter: &FilterState) -> bool {
    (filter.selected_factions.is_empty() || filter.selected_factions.contains(&unit.faction))
        && (filter.selected_unit_types.is_empty()
            || filter.selected_unit_types.contains(&unit.unit_type))
}

/// Stable sort on lowercased keys using the CLDR root collation, so accented
/// letters sort next to their base letter. Equal keys keep their input order.
fn sort_by_collation<T>(items: &mut [(String, T)]) {
    let mut collator = Collator::default();
    items.sort_by(|a, b| collator.collate(a.0.as_str(), b.0.as_str()));
}

/// Units passing the filter, sorted by display name (case-insensitive).
/// Equal names keep dataset order.
pub fn visible_units<'a>(dataset: &'a JoinedDataset, filter: &FilterState) -> Vec<&'a UnitRecord> {
    let query = filter.search_query.trim().to_lowercase();
    let mut units: Vec<(String, &UnitRecord)> = dataset
        .iter()
        .filter(|unit| matches_facets(unit, filter) && matches_search(unit, &query))
        .map(|unit| (unit.display_name.to_lowercase(), unit))
        .collect();
    sort_by_collation(&mut units);
    units.into_iter().map(|(_, unit)| unit).collect()
}

/// Distinct filterable values present in the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub factions: Vec<String>,
    pub unit_types: Vec<String>,
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<(String, String)> = Vec::new();
    for value in values {
        if !out.iter().any(|(_, v)| v == value) {
            out.push((value.to_lowercase(), value.to_string()));
        }
    }
    sort_by_collation(&mut out);
    out.into_iter().map(|(_, v)| v).collect()
}

pub fn facets(dataset: &JoinedDataset) -> Facets {
    Facets {
        factions: distinct_sorted(dataset.iter().map(|u| u.faction.as_str())),
        unit_types: distinct_sorted(dataset.iter().map(|u| u.unit_type.as_str())),
    }
}
