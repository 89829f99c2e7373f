//! Merge roster, voices and quotes into one record per unit code.
//!
//! Roster rows come first and own their metadata. Codes seen only in the
//! voices map, then only in the quotes map, are synthesized with the code as
//! name and `unknown` faction/type. A code is never inserted twice.

use std::collections::HashMap;

use crate::data::loader::{RawDocuments, RosterEntry};
use crate::data::model::{JoinedDataset, QuoteEntry, UNKNOWN, UnitRecord, VoiceEntry};

type Actions = Vec<(String, VoiceEntry)>;

/// Blank strings count as missing.
fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn roster_record(entry: RosterEntry) -> UnitRecord {
    UnitRecord {
        display_name: or_default(entry.name, &entry.code),
        faction: or_default(entry.faction, UNKNOWN),
        unit_type: or_default(entry.unit_type, UNKNOWN),
        code: entry.code,
        voices: Vec::new(),
        quotes: Vec::new(),
    }
}

/// Index a keyed document by code, remembering first-seen order.
fn keyed<T>(items: Vec<(String, T)>) -> (Vec<String>, HashMap<String, T>) {
    let mut order = Vec::with_capacity(items.len());
    let mut by_code = HashMap::with_capacity(items.len());
    for (code, value) in items {
        if !by_code.contains_key(&code) {
            order.push(code.clone());
            by_code.insert(code, value);
        }
    }
    (order, by_code)
}

pub fn join(docs: RawDocuments) -> JoinedDataset {
    let (voice_order, mut voices): (Vec<String>, HashMap<String, Actions>) = keyed(docs.voices);
    let (quote_order, mut quotes): (Vec<String>, HashMap<String, Vec<QuoteEntry>>) =
        keyed(docs.quotes);
    let mut dataset = JoinedDataset::default();

    for entry in docs.roster {
        if dataset.contains(&entry.code) {
            log::warn!("duplicate roster entry for unit {}, keeping the first", entry.code);
            continue;
        }
        let mut record = roster_record(entry);
        record.voices = voices.remove(&record.code).unwrap_or_default();
        record.quotes = quotes.remove(&record.code).unwrap_or_default();
        dataset.insert(record);
    }

    for code in voice_order {
        // Still present means the roster did not claim it.
        if let Some(actions) = voices.remove(&code) {
            let mut record = UnitRecord::synthesized(&code);
            record.voices = actions;
            record.quotes = quotes.remove(&code).unwrap_or_default();
            dataset.insert(record);
        }
    }

    for code in quote_order {
        if let Some(unit_quotes) = quotes.remove(&code) {
            let mut record = UnitRecord::synthesized(&code);
            record.quotes = unit_quotes;
            dataset.insert(record);
        }
    }

    dataset
}
