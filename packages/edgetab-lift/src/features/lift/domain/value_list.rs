//! Multi-valued fields
//!
//! A field may hold several values joined by `|`. A backslash escapes the
//! following character, so `\|` is a literal bar inside one element.

use std::collections::BTreeSet;

use crate::config::LIST_SEPARATOR;

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Split a field into its list elements. Empty input yields no elements.
pub fn split_list(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }

    let mut elements = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, ch) in value.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == ESCAPE {
            escaped = true;
        } else if ch == SEPARATOR {
            elements.push(&value[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    elements.push(&value[start..]);
    elements
}

/// Union of two list values: duplicates removed, elements sorted.
///
/// Merging `v` into `v` yields `v` for any single-element `v`. When both
/// sides hold only separators, `existing` is kept as is.
pub fn merge_values(existing: &str, incoming: &str) -> String {
    let elements: BTreeSet<&str> = split_list(existing)
        .into_iter()
        .chain(split_list(incoming))
        .filter(|element| !element.is_empty())
        .collect();
    if elements.is_empty() {
        return existing.to_string();
    }
    elements.into_iter().collect::<Vec<_>>().join(LIST_SEPARATOR)
}

/// Ordered concatenation, duplicates kept
pub fn concat_values(existing: &str, incoming: &str) -> String {
    let mut joined = String::with_capacity(existing.len() + LIST_SEPARATOR.len() + incoming.len());
    joined.push_str(existing);
    joined.push_str(LIST_SEPARATOR);
    joined.push_str(incoming);
    joined
}
