//! Autocomplete suggestions
//!
//! Suggestions are drawn from four sources in fixed precedence: product
//! names, brands, categories, tags. Matching is case-insensitive substring
//! containment; duplicates (by exact text) keep their first occurrence and
//! the list is cut at the configured limit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::filter::contains_ci;
use crate::product::ProductRef;
use crate::query::normalize_text;

/// Shortest partial text (in chars, after trimming) that produces suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 2;
/// Default upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 8;

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    ProductName,
    Brand,
    Category,
    Tag,
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductName => write!(f, "product"),
            Self::Brand => write!(f, "brand"),
            Self::Category => write!(f, "category"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

/// A single autocomplete entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub text: String,
    pub kind: SuggestionKind,
}

/// Generate at most [`MAX_SUGGESTIONS`] suggestions for `partial`.
#[must_use]
pub fn generate_suggestions(catalog: &[ProductRef], partial: &str) -> Vec<SuggestionItem> {
    generate_suggestions_with_limit(catalog, partial, MAX_SUGGESTIONS)
}

/// Generate at most `limit` suggestions for `partial`.
///
/// Returns an empty list when the trimmed partial text is shorter than
/// [`MIN_SUGGESTION_CHARS`]; the caller hides its suggestion UI in that case.
#[must_use]
pub fn generate_suggestions_with_limit(
    catalog: &[ProductRef],
    partial: &str,
    limit: usize,
) -> Vec<SuggestionItem> {
    let needle = normalize_text(partial);
    if needle.chars().count() < MIN_SUGGESTION_CHARS || limit == 0 {
        return Vec::new();
    }

    let names = catalog
        .iter()
        .map(|p| (p.name.as_str(), SuggestionKind::ProductName));
    let brands = catalog
        .iter()
        .map(|p| (p.brand.as_str(), SuggestionKind::Brand));
    let categories = catalog
        .iter()
        .map(|p| (p.category.as_str(), SuggestionKind::Category));
    let tags = catalog.iter().flat_map(|p| {
        p.tags
            .iter()
            .map(|tag| (tag.as_str(), SuggestionKind::Tag))
    });

    let mut unique: IndexMap<&str, SuggestionKind> = IndexMap::new();
    for (text, kind) in names.chain(brands).chain(categories).chain(tags) {
        if text.is_empty() || !contains_ci(text, &needle) {
            continue;
        }
        unique.entry(text).or_insert(kind);
        if unique.len() >= limit {
            break;
        }
    }

    unique
        .into_iter()
        .map(|(text, kind)| SuggestionItem {
            text: text.to_owned(),
            kind,
        })
        .collect()
}

/// Navigation keys understood by [`SuggestionCursor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// What the host should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorAction {
    /// Only the highlight moved (or nothing happened)
    None,
    /// Use this suggestion's text as the query and search
    Select(String),
    /// Enter with nothing highlighted: search the typed text
    SubmitTyped,
    /// Suggestion list dismissed
    Hide,
}

/// Keyboard highlight over the currently displayed suggestions
#[derive(Debug, Clone, Default)]
pub struct SuggestionCursor {
    items: Vec<SuggestionItem>,
    highlighted: Option<usize>,
}

impl SuggestionCursor {
    /// Replace the displayed list; the highlight is cleared.
    pub fn show(&mut self, items: Vec<SuggestionItem>) {
        self.items = items;
        self.highlighted = None;
    }

    pub fn hide(&mut self) {
        self.items.clear();
        self.highlighted = None;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn handle_key(&mut self, key: SuggestionKey) -> CursorAction {
        match key {
            SuggestionKey::Down => {
                if let Some(last) = self.items.len().checked_sub(1) {
                    self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1).min(last)));
                }
                CursorAction::None
            }
            SuggestionKey::Up => {
                self.highlighted = self.highlighted.and_then(|i| i.checked_sub(1));
                CursorAction::None
            }
            SuggestionKey::Enter => match self.highlighted.and_then(|i| self.items.get(i)) {
                Some(item) => {
                    let text = item.text.clone();
                    self.hide();
                    CursorAction::Select(text)
                }
                None => CursorAction::SubmitTyped,
            },
            SuggestionKey::Escape => {
                self.hide();
                CursorAction::Hide
            }
        }
    }
}
