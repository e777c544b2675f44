//! Provenance and region text cleanup.
//!
//! The archive's place fields are free text written by many catalogers over
//! decades. Cleanup is a set of small ordered literal tables tuned to that
//! closed dataset; entries are applied top to bottom, so an entry that is a
//! prefix of another must come after it.

/// Annotations that trail a provenance after `", "` but are not places
/// (media formats, cataloguing notes, credits).
const PROVENANCE_SUFFIXES: &[&str] = &[
    "textbok",
    "lösblad",
    "CD, Joakim Wannberg",
    "CD Margareta Johansson",
    "CD avspelade kassetter kassetter",
    "CD avspelade kassetter",
    "CD",
    "m.m.",
    "VHS",
];

/// Known misspellings and variants of region names.
const REGION_REPLACEMENTS: &[(&str, &str)] = &[
    ("dalsland", "Dalsland"),
    ("Dalsland/Västergötland", "Västra Götaland"),
    ("Västgergötland", "Västergötland"),
];

/// Remove every known non-place annotation from a raw provenance.
///
/// Matching is literal substring removal of `", <suffix>"`.
pub fn clean_provenance(raw: &str) -> String {
    PROVENANCE_SUFFIXES
        .iter()
        .fold(raw.to_string(), |acc, suffix| {
            acc.replace(&format!(", {}", suffix), "")
        })
}

/// Split on commas and trim each part. Empty parts are kept.
pub fn split_parts(s: &str) -> Vec<String> {
    s.split(',').map(|p| p.trim().to_string()).collect()
}

/// Re-join fragments that a comma split inside a parenthetical aside, then
/// drop the aside.
///
/// ```
/// use tunemap::geo::normalize::merge_parenthetical_parts;
///
/// let parts = vec!["Foo (bar".to_string(), "baz)".to_string(), "Qux".to_string()];
/// assert_eq!(merge_parenthetical_parts(parts), vec!["Foo", "Qux"]);
/// ```
pub fn merge_parenthetical_parts(parts: Vec<String>) -> Vec<String> {
    if !parts.join(", ").contains('(') {
        return parts;
    }

    let mut merged = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for part in parts {
        let closes = part.contains(')');
        current.push(part);
        if closes {
            let joined = current.join(", ");
            let before_paren = joined.split('(').next().unwrap_or_default();
            merged.push(trim_separators(before_paren).to_string());
            current.clear();
        }
    }

    if !current.is_empty() {
        merged.push(current.join(", "));
    }

    merged
}

/// Trim and correct a raw region ("Landskap") field.
pub fn normalize_region(raw: &str) -> String {
    REGION_REPLACEMENTS
        .iter()
        .fold(raw.trim().to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Place parts of a provenance, in order.
pub fn place_parts(provenance: &str) -> Vec<String> {
    merge_parenthetical_parts(split_parts(&clean_provenance(provenance)))
}

/// Region parts of a region field; `[""]` when the field is blank.
pub fn region_parts(region: &str) -> Vec<String> {
    split_parts(&normalize_region(region))
}

/// Strip spaces and commas from both ends.
pub(crate) fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == ',')
}
