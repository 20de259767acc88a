//! Engine configuration
//!
//! Defaults match the storefront's behavior; each knob can be overridden
//! through an environment variable. Unparsable values fall back to the
//! default, and zero sizes are raised to one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable for the results page size.
pub const PAGE_SIZE_ENV: &str = "CATALOG_SEARCH_PAGE_SIZE";
/// Default results page size.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Environment variable for the suggestion lane quiescence window (ms).
pub const SUGGEST_DEBOUNCE_MS_ENV: &str = "CATALOG_SEARCH_SUGGEST_DEBOUNCE_MS";
/// Default suggestion lane quiescence window (ms).
pub const DEFAULT_SUGGEST_DEBOUNCE_MS: u64 = 200;

/// Environment variable for the filter lane quiescence window (ms).
pub const FILTER_DEBOUNCE_MS_ENV: &str = "CATALOG_SEARCH_FILTER_DEBOUNCE_MS";
/// Default filter lane quiescence window (ms).
pub const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 300;

/// Environment variable for the history capacity.
pub const HISTORY_LIMIT_ENV: &str = "CATALOG_SEARCH_HISTORY_LIMIT";
/// Default history capacity.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Environment variable for the suggestion cap.
pub const SUGGESTION_LIMIT_ENV: &str = "CATALOG_SEARCH_SUGGESTION_LIMIT";
/// Default suggestion cap.
pub const DEFAULT_SUGGESTION_LIMIT: usize = crate::suggest::MAX_SUGGESTIONS;

/// Environment variable for the store key holding search history.
pub const HISTORY_KEY_ENV: &str = "CATALOG_SEARCH_HISTORY_KEY";
/// Default store key holding search history.
pub const DEFAULT_HISTORY_KEY: &str = "searchHistory";

/// Runtime settings for [`SearchController`](crate::controller::SearchController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Products revealed per page / per "load more"
    pub page_size: usize,
    /// Quiet period before suggestions refresh
    pub suggest_debounce: Duration,
    /// Quiet period before the result list refreshes
    pub filter_debounce: Duration,
    /// Maximum remembered searches
    pub history_limit: usize,
    /// Maximum suggestions shown
    pub suggestion_limit: usize,
    /// Store key for the history list
    pub history_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            suggest_debounce: Duration::from_millis(DEFAULT_SUGGEST_DEBOUNCE_MS),
            filter_debounce: Duration::from_millis(DEFAULT_FILTER_DEBOUNCE_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            history_key: DEFAULT_HISTORY_KEY.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Load config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |name: &str| lookup(name).and_then(|s| s.trim().parse::<u64>().ok());
        let count = |name: &str, default: usize| {
            parsed(name)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(default)
                .max(1)
        };

        let history_key = lookup(HISTORY_KEY_ENV)
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HISTORY_KEY.to_owned());

        Self {
            page_size: count(PAGE_SIZE_ENV, DEFAULT_PAGE_SIZE),
            suggest_debounce: Duration::from_millis(
                parsed(SUGGEST_DEBOUNCE_MS_ENV).unwrap_or(DEFAULT_SUGGEST_DEBOUNCE_MS),
            ),
            filter_debounce: Duration::from_millis(
                parsed(FILTER_DEBOUNCE_MS_ENV).unwrap_or(DEFAULT_FILTER_DEBOUNCE_MS),
            ),
            history_limit: count(HISTORY_LIMIT_ENV, DEFAULT_HISTORY_LIMIT),
            suggestion_limit: count(SUGGESTION_LIMIT_ENV, DEFAULT_SUGGESTION_LIMIT),
            history_key,
        }
    }
}
