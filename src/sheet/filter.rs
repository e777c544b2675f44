//! Facets the map front-end filters on.
//!
//! Like the place cleanup, these are ordered literal tables fitted to the
//! archive's own spelling habits.

use serde::Serialize;

use super::records::ProvenanceRecord;

pub const SONG_TYPE_COLUMN: &str = "Låttyp eller visgenre";
pub const INSTRUMENT_COLUMN: &str = "Sång  instrument";
pub const COLLECTOR_COLUMN: &str = "Inspelat/ inlämnat av";

/// Values that mean "no instrument".
const INSTRUMENT_PLACEHOLDERS: &[&str] = &["m.m", "-"];

const INSTRUMENT_REPLACEMENTS: &[(&str, &str)] = &[
    ("fioler", "fiol"),
    ("fiol 1", "fiol"),
    ("fiol 2", "fiol"),
    (
        "liktonigt knappdragspel med svarta och vita tangenter vilket innebär att det egentligen inte är ett durspel",
        "dragspel",
    ),
    (" m.m", ""),
];

const ZITHER_NAMES: &[&str] = &["cittra", "zittra"];

const NUMBER_PREFIXES: &[(&str, &str)] = &[
    ("1-", "en"),
    ("1", "en"),
    ("2-", "två"),
    ("2", "två"),
    ("3-", "tre"),
    ("3", "tre"),
    ("4-", "fyr"),
    ("4", "fyr"),
    ("5-", "fem"),
    ("5", "fem"),
];

/// Exact collector strings that carry a recording place or a guess.
const COLLECTOR_CORRECTIONS: &[(&str, &str)] = &[
    ("Josefsson, Arnold, Djupedal, Vara", "Josefsson, Arnold, Vara"),
    ("Nordström, Annika (Olsson, Elsa, ev.)", "Nordström, Annika"),
    ("Lätt, Billy, Korsberga, Hjo", "Lätt, Billy, Hjo"),
];

const COLLECTOR_CONTAINS: &[(&str, &str)] = &[("Adin, Björn", "Adin, Björn")];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SongType {
    pub main: String,
    pub secondary: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub song_type: SongType,
    pub instrument: Vec<String>,
    pub collector: String,
}

pub fn derive_filter(record: &ProvenanceRecord) -> Filter {
    Filter {
        song_type: song_type(record.text(SONG_TYPE_COLUMN)),
        instrument: instruments(record.text(INSTRUMENT_COLUMN)),
        collector: collector(record.text(COLLECTOR_COLUMN)),
    }
}

fn song_type(raw: Option<&str>) -> SongType {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return SongType::default();
    };

    let mut parts = raw
        .to_lowercase()
        .split(',')
        .map(|p| capitalize(&normalize_term(p)))
        .collect::<Vec<_>>()
        .into_iter();

    SongType {
        main: parts.next().unwrap_or_default(),
        secondary: parts.collect(),
    }
}

fn instruments(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };

    raw.split(',')
        .map(|p| capitalize(&normalize_instrument(&normalize_term(p))))
        .filter(|p| !p.is_empty())
        .collect()
}

fn collector(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let raw = raw.trim();

    if let Some((_, fixed)) = COLLECTOR_CORRECTIONS.iter().find(|(from, _)| *from == raw) {
        return fixed.to_string();
    }
    if let Some((_, fixed)) = COLLECTOR_CONTAINS.iter().find(|(needle, _)| raw.contains(needle)) {
        return fixed.to_string();
    }
    raw.to_string()
}

/// Lower-case, cut at the first `(`, trim ` ?.,`.
fn normalize_term(s: &str) -> String {
    let lower = s.to_lowercase();
    let before_paren = lower.split('(').next().unwrap_or_default();
    before_paren
        .trim_matches(|c| matches!(c, ' ' | '?' | '.' | ','))
        .to_string()
}

fn normalize_instrument(s: &str) -> String {
    if INSTRUMENT_PLACEHOLDERS.contains(&s) {
        return String::new();
    }

    let s = INSTRUMENT_REPLACEMENTS
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to));

    if ZITHER_NAMES.iter().any(|name| s.contains(name)) {
        return "cittra".to_string();
    }

    NUMBER_PREFIXES
        .iter()
        .fold(s, |acc, (from, to)| acc.replace(from, to))
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
