//! Bounded most-recently-used search history
//!
//! The list is newest-first and unique by text. It is persisted as a JSON
//! array of strings through a [`KeyValueStore`] after every change, and
//! restored once when the tracker is constructed.

use crate::config::{DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT};
use crate::error::EngineError;
use crate::query::normalize_text;
use crate::store::KeyValueStore;

/// Shortest normalized text (in chars) the search page remembers.
pub const MIN_HISTORY_CHARS: usize = 2;
/// Shortest text (in chars) the header search box remembers.
pub const MIN_GLOBAL_HISTORY_CHARS: usize = 1;

/// Store key for the site-wide header search box history.
pub const GLOBAL_HISTORY_KEY: &str = "recentGlobalSearches";
/// Capacity of the site-wide header search box history.
pub const GLOBAL_HISTORY_LIMIT: usize = 5;

/// Move `item` to the front of `entries`, dropping any older copy, then cut
/// the list to `limit`.
pub fn push_mru(entries: &mut Vec<String>, item: String, limit: usize) {
    entries.retain(|existing| *existing != item);
    entries.insert(0, item);
    entries.truncate(limit);
}

/// Persisted MRU list of committed searches
pub struct SearchHistory<S> {
    store: S,
    key: String,
    limit: usize,
    min_chars: usize,
    lowercase: bool,
    entries: Vec<String>,
}

impl<S: KeyValueStore> SearchHistory<S> {
    /// Restore the search page history (`searchHistory`, 10 entries).
    pub fn load(store: S) -> Self {
        Self::load_with(store, DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT)
    }

    /// Restore the header search box history (`recentGlobalSearches`, 5
    /// entries). Entries keep their typed case and any non-blank text counts.
    pub fn global(store: S) -> Self {
        Self::load_with(store, GLOBAL_HISTORY_KEY, GLOBAL_HISTORY_LIMIT)
            .with_min_chars(MIN_GLOBAL_HISTORY_CHARS)
            .preserving_case()
    }

    /// Restore a history list stored under `key`, bounded at `limit`.
    pub fn load_with(store: S, key: impl Into<String>, limit: usize) -> Self {
        let mut history = Self {
            store,
            key: key.into(),
            limit: limit.max(1),
            min_chars: MIN_HISTORY_CHARS,
            lowercase: true,
            entries: Vec::new(),
        };
        history.reload();
        history
    }

    /// Remember only text of at least `min_chars` chars (after trimming).
    #[must_use]
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars.max(1);
        self
    }

    /// Store trimmed text as typed instead of lowercasing it.
    #[must_use]
    pub const fn preserving_case(mut self) -> Self {
        self.lowercase = false;
        self
    }

    /// Re-read the persisted list, e.g. to pick up another tab's writes.
    ///
    /// Unparsable state reads as an empty history. Persisted lists that break
    /// the uniqueness or capacity bounds are repaired in memory.
    pub fn reload(&mut self) {
        let restored = match self.store.get(&self.key) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    let err = EngineError::malformed(&self.key, e);
                    tracing::warn!(
                        error = %err,
                        error_type = err.error_type(),
                        "discarding unreadable search history"
                    );
                    Vec::new()
                }
            },
        };

        self.entries.clear();
        for entry in restored {
            if !self.entries.contains(&entry) && self.entries.len() < self.limit {
                self.entries.push(entry);
            }
        }
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a committed search. Returns `false` (and changes nothing) when
    /// the trimmed text is shorter than the tracker's minimum.
    pub fn commit(&mut self, text: &str) -> bool {
        let entry = if self.lowercase {
            normalize_text(text)
        } else {
            text.trim().to_owned()
        };
        if entry.chars().count() < self.min_chars {
            return false;
        }
        push_mru(&mut self.entries, entry, self.limit);
        self.persist();
        true
    }

    /// Forget every entry and delete the persisted list.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.store.remove(&self.key);
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "failed to encode search history");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &json) {
            let err = EngineError::from(e);
            tracing::warn!(
                error = %err,
                error_type = err.error_type(),
                key = %self.key,
                "search history kept in memory only"
            );
        }
    }
}
