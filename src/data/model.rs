//! Joined unit records and the voice-line entries attached to them.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Placeholder faction/type for units that appear only in voices or quotes.
pub const UNKNOWN: &str = "unknown";

/// The `Sounds` field of a voice entry as it was authored.
#[derive(Debug, Clone, PartialEq)]
pub enum Sounds {
    List(Vec<String>),
    /// Missing, not an array, or containing non-string items.
    Malformed,
}

/// A pool of clips for one action of one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceEntry {
    pub sounds: Sounds,
    /// Raw percentage as authored; `None` when absent or unparseable.
    pub volume_percent: Option<f64>,
}

impl VoiceEntry {
    /// Build an entry from the JSON value stored under an action name.
    /// Never fails: bad data surfaces as `Sounds::Malformed` at click time.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self {
                sounds: Sounds::Malformed,
                volume_percent: None,
            };
        };
        let sounds = match obj.get("Sounds") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map_or(Sounds::Malformed, Sounds::List),
            _ => Sounds::Malformed,
        };
        Self {
            sounds,
            volume_percent: obj.get("Volume").and_then(parse_percent),
        }
    }

    /// Clip names with blank entries discarded. `None` if the list is malformed.
    pub fn playable_sounds(&self) -> Option<Vec<&str>> {
        match &self.sounds {
            Sounds::List(list) => Some(
                list.iter()
                    .map(String::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .collect(),
            ),
            Sounds::Malformed => None,
        }
    }

    pub fn volume(&self) -> f64 {
        volume_from_percent(self.volume_percent)
    }
}

/// Accepts `50`, `50.5` or `"50"`. Strings are read up to the end of their
/// leading number, so `"50%"` is 50.
pub fn parse_percent(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => leading_number(s.trim())?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || has_digits {
            has_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Map a 0-100 percentage to a media volume in [0, 1]. Absent means full volume.
pub fn volume_from_percent(percent: Option<f64>) -> f64 {
    match percent {
        Some(p) if p.is_finite() => (p / 100.0).clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// A directly named voice line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteEntry {
    /// Button label.
    #[serde(rename = "quote")]
    pub text: String,
    /// Clip base name.
    #[serde(rename = "file")]
    pub clip_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitRecord {
    pub code: String,
    pub display_name: String,
    pub faction: String,
    pub unit_type: String,
    /// Actions in document order.
    pub voices: Vec<(String, VoiceEntry)>,
    pub quotes: Vec<QuoteEntry>,
}

impl UnitRecord {
    /// Record for a code with no roster entry.
    pub fn synthesized(code: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: code.to_string(),
            faction: UNKNOWN.to_string(),
            unit_type: UNKNOWN.to_string(),
            voices: Vec::new(),
            quotes: Vec::new(),
        }
    }

    /// Exact-name action lookup, as used by button clicks.
    pub fn action(&self, name: &str) -> Option<&VoiceEntry> {
        self.voices
            .iter()
            .find(|(action, _)| action == name)
            .map(|(_, entry)| entry)
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.voices.iter().map(|(name, _)| name.as_str())
    }
}

/// All units keyed by code, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedDataset {
    units: Vec<UnitRecord>,
    index: HashMap<String, usize>,
}

impl JoinedDataset {
    /// Insert unless the code is already present. Returns whether it was inserted.
    pub fn insert(&mut self, unit: UnitRecord) -> bool {
        if self.index.contains_key(&unit.code) {
            return false;
        }
        self.index.insert(unit.code.clone(), self.units.len());
        self.units.push(unit);
        true
    }

    pub fn get(&self, code: &str) -> Option<&UnitRecord> {
        self.index.get(code).map(|&i| &self.units[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitRecord> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn volume_mapping() {
        assert_eq!(volume_from_percent(Some(0.0)), 0.0);
        assert_eq!(volume_from_percent(Some(100.0)), 1.0);
        assert_eq!(volume_from_percent(Some(150.0)), 1.0);
        assert_eq!(volume_from_percent(Some(-20.0)), 0.0);
        assert_eq!(volume_from_percent(Some(50.0)), 0.5);
        assert_eq!(volume_from_percent(None), 1.0);
    }

    #[test]
    fn volume_mapping_is_monotonic() {
        let mut last = volume_from_percent(Some(-50.0));
        for p in -50..=200 {
            let v = volume_from_percent(Some(p as f64));
            assert!(v >= last);
            assert!((0.0..=1.0).contains(&v));
            last = v;
        }
    }

    #[test]
    fn percent_accepts_numbers_and_strings() {
        assert_eq!(parse_percent(&json!(75)), Some(75.0));
        assert_eq!(parse_percent(&json!(" 50 ")), Some(50.0));
        assert_eq!(parse_percent(&json!("50%")), Some(50.0));
        assert_eq!(parse_percent(&json!("50 ")), Some(50.0));
        assert_eq!(parse_percent(&json!(".5")), Some(0.5));
        assert_eq!(parse_percent(&json!("7.")), Some(7.0));
        assert_eq!(parse_percent(&json!("-20dB")), Some(-20.0));
        assert_eq!(parse_percent(&json!("1e2x")), Some(100.0));
        assert_eq!(parse_percent(&json!("3e")), Some(3.0));
        assert_eq!(parse_percent(&json!("")), None);
        assert_eq!(parse_percent(&json!("-")), None);
        assert_eq!(parse_percent(&json!(".")), None);
        assert_eq!(parse_percent(&json!("loud")), None);
        assert_eq!(parse_percent(&json!(null)), None);
        assert_eq!(parse_percent(&json!("NaN")), None);
    }

    #[test]
    fn entry_with_unparseable_volume_plays_at_full() {
        let entry = VoiceEntry::from_value(&json!({"Sounds": ["a"], "Volume": "loud"}));
        assert_eq!(entry.volume(), 1.0);
    }

    #[test]
    fn entry_volume_reads_leading_number() {
        let entry = VoiceEntry::from_value(&json!({"Sounds": ["a"], "Volume": "50%"}));
        assert_eq!(entry.volume(), 0.5);
    }

    #[test]
    fn blank_sounds_are_discarded() {
        let entry = VoiceEntry::from_value(&json!({"Sounds": ["s1", "", "  ", "s2"]}));
        assert_eq!(entry.playable_sounds(), Some(vec!["s1", "s2"]));
    }

    #[test]
    fn non_list_sounds_are_malformed() {
        for value in [
            json!({"Sounds": "s1"}),
            json!({"Volume": 10}),
            json!({"Sounds": ["s1", 3]}),
            json!("not an object"),
        ] {
            let entry = VoiceEntry::from_value(&value);
            assert_eq!(entry.sounds, Sounds::Malformed);
            assert_eq!(entry.playable_sounds(), None);
        }
    }

    #[test]
    fn dataset_insert_is_first_wins() {
        let mut data = JoinedDataset::default();
        assert!(data.insert(UnitRecord::synthesized("A")));
        let mut other = UnitRecord::synthesized("A");
        other.display_name = "Alpha".into();
        assert!(!data.insert(other));
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("A").unwrap().display_name, "A");
    }
}
