//! Search results model
//!
//! [`ResultSet`] is the output of [`SearchEngine::search`]: the full ranked
//! sequence of matching products. Paging over it is handled by
//! [`ResultWindow`](crate::pagination::ResultWindow), never by re-running the
//! search.
//!
//! [`SearchEngine::search`]: crate::engine::SearchEngine::search

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::product::{ProductId, ProductRef};

/// Ranked products for one evaluation of a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    /// Matched products in final order
    pub hits: Vec<ProductRef>,
    /// Number of matched products
    pub total_count: usize,
    /// Wall-clock time for filter + rank (diagnostics only)
    pub elapsed: Duration,
}

impl ResultSet {
    /// Build a result set from ranked hits.
    #[must_use]
    pub fn new(hits: Vec<ProductRef>, elapsed: Duration) -> Self {
        Self {
            total_count: hits.len(),
            hits,
            elapsed,
        }
    }

    /// A result set with no hits
    #[must_use]
    pub const fn empty(elapsed: Duration) -> Self {
        Self {
            hits: Vec::new(),
            total_count: 0,
            elapsed,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Product ids in ranked order.
    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        self.hits.iter().map(|p| p.id).collect()
    }

    /// Elapsed time in fractional seconds, as shown next to the result count.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

    #[test]
    fn empty_result_set() {
        let rs = ResultSet::empty(Duration::ZERO);
        assert!(rs.is_empty());
        assert_eq!(rs.len(), 0);
        assert!(rs.ids().is_empty());
    }

    #[test]
    fn total_count_tracks_hits() {
        let hits = vec![
            Product::new(3, "c").into_ref(),
            Product::new(1, "a").into_ref(),
        ];
        let rs = ResultSet::new(hits, Duration::from_millis(2));
        assert_eq!(rs.total_count, 2);
        assert_eq!(rs.ids(), vec![3, 1]);
        assert!((rs.elapsed_secs() - 0.002).abs() < 1e-9);
    }

    #[test]
    fn serializes_products_inline() {
        let rs = ResultSet::new(vec![Product::new(9, "Hoodie").into_ref()], Duration::ZERO);
        let json = serde_json::to_value(&rs).unwrap();
        assert_eq!(json["total_count"], 1);
        assert_eq!(json["hits"][0]["name"], "Hoodie");
    }
}
