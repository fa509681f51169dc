//! Comma-joined encoding for the ID sets kept under the reserved keys.

use std::collections::BTreeSet;

use crate::ids::ArtworkId;

const SEPARATOR: char = ',';

/// Decode a stored value into a set. An absent or empty value is the empty set.
pub fn decode(raw: Option<&str>) -> BTreeSet<String> {
    match raw {
        Some(raw) => raw
            .split(SEPARATOR)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => BTreeSet::new(),
    }
}

/// Encode a set as a comma-joined string.
pub fn encode(set: &BTreeSet<String>) -> String {
    set.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Comma-joined artwork IDs, in the form the catalog's `ids=` query takes.
pub fn encode_ids(ids: &[ArtworkId]) -> String {
    ids.iter()
        .map(ArtworkId::key)
        .collect::<Vec<_>>()
        .join(",")
}
