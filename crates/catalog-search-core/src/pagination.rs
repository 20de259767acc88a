//! Incremental result window
//!
//! A [`ResultWindow`] owns one ranked [`ResultSet`] and reveals it a page at a
//! time. Growing the window never re-ranks: the visible prefix of a larger
//! window is always identical to the smaller one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::product::ProductRef;
use crate::query::Query;
use crate::results::ResultSet;

/// Growing view over a ranked result set for one query
#[derive(Debug, Clone)]
pub struct ResultWindow {
    query: Query,
    results: ResultSet,
    page_size: usize,
    pages: usize,
}

impl ResultWindow {
    /// Open a window on the first page.
    #[must_use]
    pub fn new(query: Query, results: ResultSet, page_size: usize) -> Self {
        Self {
            query,
            results,
            page_size: page_size.max(1),
            pages: 1,
        }
    }

    /// Open a window with the default page size.
    #[must_use]
    pub fn with_default_page_size(query: Query, results: ResultSet) -> Self {
        Self::new(query, results, DEFAULT_PAGE_SIZE)
    }

    /// Reveal one more page. Returns `false` when everything was already
    /// visible.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.pages += 1;
        true
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.page_size
            .saturating_mul(self.pages)
            .min(self.results.total_count)
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible_count() < self.results.total_count
    }

    #[must_use]
    pub fn visible(&self) -> &[ProductRef] {
        &self.results.hits[..self.visible_count()]
    }

    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.results.total_count
    }

    /// Pages revealed so far (1-based).
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// The query this window was ranked for.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub const fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Plain-data snapshot for the presentation layer.
    #[must_use]
    pub fn page(&self) -> PageView {
        PageView {
            items: self.visible().to_vec(),
            visible_count: self.visible_count(),
            total_count: self.total_count(),
            has_more: self.has_more(),
            elapsed: self.results.elapsed,
        }
    }
}

/// What the result grid should currently show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub items: Vec<ProductRef>,
    pub visible_count: usize,
    pub total_count: usize,
    pub has_more: bool,
    pub elapsed: Duration,
}
