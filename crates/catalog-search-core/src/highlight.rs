//! Match highlighting for result titles

use serde::{Deserialize, Serialize};

use crate::query::normalize_text;

/// A byte range within a text that should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

/// Find every non-overlapping, case-insensitive occurrence of `query` in
/// `text`.
///
/// Offsets index into the original `text` and always fall on char
/// boundaries, even where lowercasing changes byte lengths.
#[must_use]
pub fn find_highlights(text: &str, query: &str) -> Vec<HighlightRange> {
    let needle = normalize_text(query);
    if needle.is_empty() {
        return Vec::new();
    }

    // Lowercase char by char, remembering which original byte each lowered
    // byte came from.
    let mut lower = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len() + 1);
    for (offset, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            let before = lower.len();
            lower.push(lc);
            origin.extend(std::iter::repeat_n(offset, lower.len() - before));
        }
    }
    origin.push(text.len());

    let mut ranges = Vec::new();
    let mut search_from = 0;
    while let Some(pos) = lower[search_from..].find(&needle) {
        let abs_pos = search_from + pos;
        let end = abs_pos + needle.len();
        let start = origin[abs_pos];
        let orig_end = end_of_char(text, origin[end - 1]);
        ranges.push(HighlightRange {
            start,
            end: orig_end,
        });
        search_from = end;
    }
    ranges
}

fn end_of_char(text: &str, start: usize) -> usize {
    text[start..]
        .chars()
        .next()
        .map_or(text.len(), |c| start + c.len_utf8())
}
