//! Search engine facade
//!
//! [`SearchEngine`] binds a [`CatalogAccessor`] to the pure pipeline:
//! snapshot → [`filter_catalog`] → [`rank`] → [`ResultSet`]. It holds no
//! state between evaluations; each call reads a fresh snapshot.

use std::time::Instant;

use crate::catalog::CatalogAccessor;
use crate::config::DEFAULT_SUGGESTION_LIMIT;
use crate::error::EngineError;
use crate::filter::filter_catalog;
use crate::product::ProductRef;
use crate::query::Query;
use crate::ranking::rank;
use crate::results::ResultSet;
use crate::suggest::{SuggestionItem, generate_suggestions_with_limit};

/// Filter and rank `catalog` for `query`.
///
/// Pure apart from the elapsed-time measurement: the hit order depends only
/// on the catalog contents and the query.
#[must_use]
pub fn evaluate(catalog: &[ProductRef], query: &Query) -> ResultSet {
    let started = Instant::now();
    let mut candidates = filter_catalog(catalog, query);
    rank(&mut candidates, query);
    let hits: Vec<ProductRef> = candidates.iter().map(|c| ProductRef::clone(c.product)).collect();
    let results = ResultSet::new(hits, started.elapsed());

    tracing::debug!(
        query = %query.normalized_text,
        sort = %query.sort_mode,
        catalog_size = catalog.len(),
        total = results.total_count,
        elapsed_us = u64::try_from(results.elapsed.as_micros()).unwrap_or(u64::MAX),
        "catalog search evaluated"
    );
    results
}

/// Catalog search over an injected accessor
pub struct SearchEngine<C> {
    catalog: C,
    suggestion_limit: usize,
}

impl<C: CatalogAccessor> SearchEngine<C> {
    #[must_use]
    pub const fn new(catalog: C) -> Self {
        Self {
            catalog,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Cap suggestions at `limit` instead of the default eight.
    #[must_use]
    pub const fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Read the current catalog. An absent catalog reads as empty.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ProductRef> {
        self.catalog.snapshot().unwrap_or_else(|| {
            let err = EngineError::AbsentCatalog;
            tracing::debug!(error = %err, "searching an empty catalog");
            Vec::new()
        })
    }

    /// Evaluate `query` against a fresh snapshot.
    #[must_use]
    pub fn search(&self, query: &Query) -> ResultSet {
        evaluate(&self.snapshot(), query)
    }

    /// Autocomplete `partial` against a fresh snapshot.
    #[must_use]
    pub fn suggest(&self, partial: &str) -> Vec<SuggestionItem> {
        generate_suggestions_with_limit(&self.snapshot(), partial, self.suggestion_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::product::Product;
    use crate::query::SortMode;

    struct NoCatalog;

    impl CatalogAccessor for NoCatalog {
        fn snapshot(&self) -> Option<Vec<ProductRef>> {
            None
        }
    }

    fn engine() -> SearchEngine<StaticCatalog> {
        SearchEngine::new(StaticCatalog::new([
            Product::new(1, "Red Shirt")
                .with_brand("Nike")
                .with_price(50.0)
                .with_rating(4.0),
            Product::new(2, "Red Shoes")
                .with_brand("Nike")
                .with_price(80.0)
                .with_rating(5.0),
            Product::new(3, "Blue Jeans")
                .with_brand("Levis")
                .with_price(60.0)
                .with_rating(3.0),
        ]))
    }

    #[test]
    fn search_filters_and_ranks() {
        let engine = engine();
        let rs = engine.search(&Query::new("red").with_sort_mode(SortMode::PriceDesc));
        assert_eq!(rs.ids(), vec![2, 1]);
        assert_eq!(rs.total_count, 2);
    }

    #[test]
    fn absent_catalog_yields_empty_results() {
        let engine = SearchEngine::new(NoCatalog);
        assert!(engine.search(&Query::default()).is_empty());
        assert!(engine.suggest("red").is_empty());
    }

    #[test]
    fn suggest_respects_limit() {
        let engine = engine().with_suggestion_limit(1);
        let out = engine.suggest("re");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Red Shirt");
    }

    #[test]
    fn evaluate_is_deterministic() {
        let snapshot = engine().snapshot();
        let q = Query::new("e");
        assert_eq!(evaluate(&snapshot, &q).ids(), evaluate(&snapshot, &q).ids());
    }

    #[test]
    fn search_does_not_mutate_query() {
        let engine = engine();
        let q = Query::new(" RED ").with_rating_thresholds([4]);
        let before = q.clone();
        let _ = engine.search(&q);
        assert_eq!(q, before);
    }
}
