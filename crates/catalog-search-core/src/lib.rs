//! Client-side product catalog search and filtering
//!
//! This crate turns raw search-page control values into ranked, paged product
//! listings:
//! - [`Query`] / [`FilterState`] — normalized query model and raw UI inputs
//! - [`filter_catalog`] / [`rank`] / [`evaluate`] — the pure filter and rank pipeline
//! - [`generate_suggestions`] — autocomplete over names, brands, categories, and tags
//! - [`SearchHistory`] — bounded most-recent-first list persisted to a [`KeyValueStore`]
//! - [`ResultWindow`] — incremental "load more" paging
//! - [`SearchController`] — debounced event-driven session wiring it all together
//!
//! The catalog, persistent store, and clock are injected through the
//! [`CatalogAccessor`], [`KeyValueStore`], and [`Clock`] traits.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod history;
pub mod pagination;
pub mod product;
pub mod query;
pub mod ranking;
pub mod results;
pub mod store;
pub mod suggest;

// Re-export key types
pub use catalog::{
    ADMIN_PRODUCTS_KEY, AdminProductRecord, CatalogAccessor, StaticCatalog, StoredCatalog,
};
pub use config::EngineConfig;
pub use controller::{ControllerEvent, SearchController};
pub use debounce::{Clock, DebounceTimer, ManualClock, SystemClock};
pub use engine::{SearchEngine, evaluate};
pub use error::{EngineError, EngineResult, StoreError};
pub use filter::{Candidate, active_filter_count, filter_catalog, has_active_filters, matches};
pub use highlight::{HighlightRange, find_highlights};
pub use history::{
    GLOBAL_HISTORY_KEY, GLOBAL_HISTORY_LIMIT, MIN_GLOBAL_HISTORY_CHARS, MIN_HISTORY_CHARS,
    SearchHistory, push_mru,
};
pub use pagination::{PageView, ResultWindow};
pub use product::{Product, ProductId, ProductRef};
pub use query::{FilterState, PriceBucket, PriceRange, Query, SortMode, normalize_text};
pub use ranking::rank;
pub use results::ResultSet;
pub use store::{KeyValueStore, MemoryStore};
pub use suggest::{
    CursorAction, MAX_SUGGESTIONS, MIN_SUGGESTION_CHARS, SuggestionCursor, SuggestionItem,
    SuggestionKey, SuggestionKind, generate_suggestions, generate_suggestions_with_limit,
};
