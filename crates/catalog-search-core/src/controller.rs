//! Debounced input controller
//!
//! [`SearchController`] is what UI event handlers talk to. Keystrokes only
//! reschedule two independent lanes:
//!
//! - the suggestion lane (default 200 ms) regenerates autocomplete entries;
//! - the filter lane (default 300 ms) re-evaluates the full query, resets the
//!   result window and records the search in history.
//!
//! The host's event loop calls [`SearchController::tick`] (sleeping until
//! [`SearchController::next_deadline`] in between). A lane that fires reads
//! the filter state current at that instant, so the last keystroke before
//! quiescence always wins. Everything runs on the caller's thread.
//!
//! Dropdowns, checkboxes, explicit submits, and picks from the suggestion or
//! history lists bypass the lanes and evaluate immediately.

use std::time::Instant;

use crate::catalog::CatalogAccessor;
use crate::config::EngineConfig;
use crate::debounce::{Clock, DebounceTimer};
use crate::engine::SearchEngine;
use crate::highlight::{HighlightRange, find_highlights};
use crate::history::SearchHistory;
use crate::pagination::{PageView, ResultWindow};
use crate::product::Product;
use crate::query::{FilterState, Query, SortMode};
use crate::store::KeyValueStore;
use crate::suggest::{CursorAction, SuggestionCursor, SuggestionItem, SuggestionKey};

/// Output for the presentation layer
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// Show this autocomplete list
    Suggestions(Vec<SuggestionItem>),
    /// Hide the autocomplete list
    SuggestionsHidden,
    /// Replace the result grid
    Results(PageView),
    /// The recent-searches list changed (newest first)
    HistoryChanged(Vec<String>),
}

/// Whether an evaluation counts as a committed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commit {
    Yes,
    No,
}

/// Event-driven search session over injected collaborators
pub struct SearchController<C, S, K> {
    engine: SearchEngine<C>,
    history: SearchHistory<S>,
    clock: K,
    config: EngineConfig,
    filters: FilterState,
    suggest_lane: DebounceTimer,
    filter_lane: DebounceTimer,
    window: Option<ResultWindow>,
    cursor: SuggestionCursor,
}

impl<C, S, K> SearchController<C, S, K>
where
    C: CatalogAccessor,
    S: KeyValueStore,
    K: Clock,
{
    /// Build a controller; history is restored from `store` immediately.
    pub fn new(catalog: C, store: S, clock: K, config: EngineConfig) -> Self {
        let engine = SearchEngine::new(catalog).with_suggestion_limit(config.suggestion_limit);
        let history =
            SearchHistory::load_with(store, config.history_key.clone(), config.history_limit);
        Self {
            engine,
            history,
            clock,
            suggest_lane: DebounceTimer::new(config.suggest_debounce),
            filter_lane: DebounceTimer::new(config.filter_debounce),
            config,
            filters: FilterState::default(),
            window: None,
            cursor: SuggestionCursor::default(),
        }
    }

    /// Initial page load. A non-blank `initial_text` (e.g. a `q` URL
    /// parameter) runs as a submitted search; otherwise the whole catalog is
    /// listed without touching history.
    pub fn open(&mut self, initial_text: Option<&str>) -> Vec<ControllerEvent> {
        match initial_text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => {
                self.filters.text = text.to_owned();
                self.submit()
            }
            None => {
                let mut events = Vec::new();
                self.evaluate(self.query(), Commit::No, &mut events);
                events
            }
        }
    }

    /// A keystroke in the search box: reschedule both lanes.
    pub fn on_input(&mut self, text: &str) {
        text.clone_into(&mut self.filters.text);
        let now = self.clock.now();
        self.suggest_lane.schedule(now);
        self.filter_lane.schedule(now);
        tracing::trace!(len = text.len(), "search input rescheduled lanes");
    }

    /// Run whichever lanes are due.
    pub fn tick(&mut self) -> Vec<ControllerEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.suggest_lane.fire_if_due(now) {
            self.run_suggest_lane(&mut events);
        }
        if self.filter_lane.fire_if_due(now) {
            self.run_filter_lane(&mut events);
        }
        events
    }

    /// Earliest pending lane deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.suggest_lane.deadline(), self.filter_lane.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Explicit search (Enter or the search button): evaluate now, skipping
    /// any pending debounce.
    pub fn submit(&mut self) -> Vec<ControllerEvent> {
        self.suggest_lane.cancel();
        self.filter_lane.cancel();
        self.cursor.hide();

        let mut events = Vec::new();
        self.evaluate(self.query(), Commit::Yes, &mut events);
        events.push(ControllerEvent::SuggestionsHidden);
        events
    }

    /// Replace every control value at once and evaluate immediately.
    pub fn set_filters(&mut self, filters: FilterState) -> Vec<ControllerEvent> {
        self.filters = filters;
        self.filter_lane.cancel();
        let mut events = Vec::new();
        self.refresh(Commit::Yes, &mut events);
        events
    }

    /// Change the ordering and evaluate immediately.
    pub fn set_sort_mode(&mut self, mode: SortMode) -> Vec<ControllerEvent> {
        let mut filters = self.filters.clone();
        filters.sort = mode.to_string();
        self.set_filters(filters)
    }

    /// Use a suggestion's text as the query and search.
    pub fn select_suggestion(&mut self, text: &str) -> Vec<ControllerEvent> {
        text.clone_into(&mut self.filters.text);
        self.submit()
    }

    /// Re-run a remembered search.
    pub fn select_history(&mut self, text: &str) -> Vec<ControllerEvent> {
        self.select_suggestion(text)
    }

    /// Keyboard navigation while the suggestion list has focus.
    pub fn handle_key(&mut self, key: SuggestionKey) -> Vec<ControllerEvent> {
        match self.cursor.handle_key(key) {
            CursorAction::None => Vec::new(),
            CursorAction::Select(text) => self.select_suggestion(&text),
            CursorAction::SubmitTyped => self.submit(),
            CursorAction::Hide => vec![ControllerEvent::SuggestionsHidden],
        }
    }

    /// Reveal the next page of the current results without re-ranking.
    /// Emits nothing when there are no results or everything is visible.
    pub fn load_more(&mut self) -> Vec<ControllerEvent> {
        let Some(window) = self.window.as_mut() else {
            return Vec::new();
        };
        if window.load_more() {
            vec![ControllerEvent::Results(window.page())]
        } else {
            Vec::new()
        }
    }

    /// Empty the search box, keep the other filters, and list what remains.
    pub fn clear_search(&mut self) -> Vec<ControllerEvent> {
        self.filters.text.clear();
        self.suggest_lane.cancel();
        self.filter_lane.cancel();
        self.cursor.hide();

        let mut events = vec![ControllerEvent::SuggestionsHidden];
        self.evaluate(self.query(), Commit::No, &mut events);
        events
    }

    /// Reset every control to its default and list the whole catalog.
    pub fn clear_all_filters(&mut self) -> Vec<ControllerEvent> {
        self.filters = FilterState::default();
        self.suggest_lane.cancel();
        self.filter_lane.cancel();
        self.cursor.hide();

        let mut events = vec![ControllerEvent::SuggestionsHidden];
        self.evaluate(self.query(), Commit::No, &mut events);
        events
    }

    /// Forget all remembered searches.
    pub fn clear_history(&mut self) -> Vec<ControllerEvent> {
        self.history.clear();
        vec![ControllerEvent::HistoryChanged(Vec::new())]
    }

    /// Pick up history written by another tab.
    pub fn reload_history(&mut self) -> Vec<ControllerEvent> {
        self.history.reload();
        vec![ControllerEvent::HistoryChanged(self.history.entries().to_vec())]
    }

    /// Query assembled from the current control values.
    #[must_use]
    pub fn query(&self) -> Query {
        Query::from_filter_state(&self.filters)
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn page(&self) -> Option<PageView> {
        self.window.as_ref().map(ResultWindow::page)
    }

    #[must_use]
    pub const fn window(&self) -> Option<&ResultWindow> {
        self.window.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    #[must_use]
    pub fn suggestions(&self) -> &[SuggestionItem] {
        self.cursor.items()
    }

    #[must_use]
    pub const fn highlighted_suggestion(&self) -> Option<usize> {
        self.cursor.highlighted()
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine(&self) -> &SearchEngine<C> {
        &self.engine
    }

    /// Ranges of `product.name` matching the text the current results were
    /// ranked for.
    #[must_use]
    pub fn name_highlights(&self, product: &Product) -> Vec<HighlightRange> {
        self.window.as_ref().map_or_else(Vec::new, |w| {
            find_highlights(&product.name, &w.query().normalized_text)
        })
    }

    fn run_suggest_lane(&mut self, events: &mut Vec<ControllerEvent>) {
        let items = self.engine.suggest(&self.filters.text);
        tracing::debug!(count = items.len(), "suggestion lane fired");
        if items.is_empty() {
            self.cursor.hide();
            events.push(ControllerEvent::SuggestionsHidden);
        } else {
            self.cursor.show(items.clone());
            events.push(ControllerEvent::Suggestions(items));
        }
    }

    fn run_filter_lane(&mut self, events: &mut Vec<ControllerEvent>) {
        tracing::debug!("filter lane fired");
        self.refresh(Commit::Yes, events);
    }

    // Keeps the current window when the query has not changed since it was
    // ranked. The search still counts as committed.
    fn refresh(&mut self, commit: Commit, events: &mut Vec<ControllerEvent>) {
        let query = self.query();
        if self.window.as_ref().is_some_and(|w| *w.query() == query) {
            tracing::debug!("query unchanged, keeping result window");
            self.record(&query.raw_text, commit, events);
            return;
        }
        self.evaluate(query, commit, events);
    }

    fn evaluate(&mut self, query: Query, commit: Commit, events: &mut Vec<ControllerEvent>) {
        let results = self.engine.search(&query);
        let raw_text = query.raw_text.clone();
        let window = ResultWindow::new(query, results, self.config.page_size);
        events.push(ControllerEvent::Results(window.page()));
        self.window = Some(window);
        self.record(&raw_text, commit, events);
    }

    fn record(&mut self, raw_text: &str, commit: Commit, events: &mut Vec<ControllerEvent>) {
        if commit == Commit::Yes && self.history.commit(raw_text) {
            events.push(ControllerEvent::HistoryChanged(
                self.history.entries().to_vec(),
            ));
        }
    }
}
