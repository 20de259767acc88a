//! Ordering of filtered candidates
//!
//! Every mode is applied with a stable sort (`slice::sort_by`), so candidates
//! with equal keys keep the catalog order the filter stage produced.

use std::cmp::Ordering;

use crate::filter::Candidate;
use crate::query::{Query, SortMode};

/// Order `candidates` in place according to `query.sort_mode`.
pub fn rank(candidates: &mut [Candidate<'_>], query: &Query) {
    match query.sort_mode {
        SortMode::PriceAsc => {
            candidates.sort_by(|a, b| a.product.price.total_cmp(&b.product.price));
        }
        SortMode::PriceDesc => {
            candidates.sort_by(|a, b| b.product.price.total_cmp(&a.product.price));
        }
        SortMode::NameAsc => {
            candidates.sort_by(|a, b| compare_names(&a.product.name, &b.product.name));
        }
        SortMode::RatingDesc => candidates.sort_by(by_rating_desc),
        SortMode::Newest => candidates.sort_by(|a, b| b.position.cmp(&a.position)),
        SortMode::Relevance if query.normalized_text.is_empty() => {
            candidates.sort_by(by_rating_desc);
        }
        SortMode::Relevance => {
            let needle = query.normalized_text.as_str();
            candidates.sort_by(|a, b| compare_relevance(a, b, needle));
        }
    }
}

fn by_rating_desc(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.product.rating.total_cmp(&a.product.rating)
}

// Case-insensitive alphabetical, then byte order so "a" and "A" still order
// deterministically.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Relevance comparator for a non-empty, already normalized query.
///
/// Tie-breaks in order: exact name, name prefix, exact brand, rating.
#[must_use]
pub fn compare_relevance(a: &Candidate<'_>, b: &Candidate<'_>, needle: &str) -> Ordering {
    let a_name = a.product.name.to_lowercase();
    let b_name = b.product.name.to_lowercase();

    prefer(a_name == needle, b_name == needle)
        .then_with(|| prefer(a_name.starts_with(needle), b_name.starts_with(needle)))
        .then_with(|| {
            prefer(
                a.product.brand.to_lowercase() == needle,
                b.product.brand.to_lowercase() == needle,
            )
        })
        .then_with(|| by_rating_desc(a, b))
}

/// `true` sorts first.
const fn prefer(a: bool, b: bool) -> Ordering {
    match (a, b) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_catalog;
    use crate::product::{Product, ProductRef};

    fn p(id: i64, name: &str, brand: &str, price: f64, rating: f32) -> ProductRef {
        Product::new(id, name)
            .with_brand(brand)
            .with_price(price)
            .with_rating(rating)
            .into_ref()
    }

    fn ranked(catalog: &[ProductRef], query: &Query) -> Vec<i64> {
        let mut candidates = filter_catalog(catalog, query);
        rank(&mut candidates, query);
        candidates.iter().map(|c| c.product.id).collect()
    }

    #[test]
    fn price_sorts_are_stable() {
        let catalog = vec![
            p(1, "a", "x", 20.0, 1.0),
            p(2, "b", "x", 10.0, 1.0),
            p(3, "c", "x", 20.0, 1.0),
            p(4, "d", "x", 10.0, 1.0),
        ];
        let q = Query::new("").with_sort_mode(SortMode::PriceAsc);
        assert_eq!(ranked(&catalog, &q), vec![2, 4, 1, 3]);

        let q = Query::new("").with_sort_mode(SortMode::PriceDesc);
        assert_eq!(ranked(&catalog, &q), vec![1, 3, 2, 4]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let catalog = vec![
            p(1, "banana", "x", 1.0, 1.0),
            p(2, "Apple", "x", 1.0, 1.0),
            p(3, "cherry", "x", 1.0, 1.0),
            p(4, "apple", "x", 1.0, 1.0),
        ];
        let q = Query::new("").with_sort_mode(SortMode::NameAsc);
        assert_eq!(ranked(&catalog, &q), vec![2, 4, 1, 3]);
    }

    #[test]
    fn newest_reverses_catalog_order() {
        let catalog = vec![
            p(10, "a", "x", 1.0, 1.0),
            p(3, "b", "x", 1.0, 1.0),
            p(7, "c", "x", 1.0, 1.0),
        ];
        let q = Query::new("").with_sort_mode(SortMode::Newest);
        assert_eq!(ranked(&catalog, &q), vec![7, 3, 10]);
    }

    #[test]
    fn rating_desc_keeps_ties_in_catalog_order() {
        let catalog = vec![
            p(1, "a", "x", 1.0, 4.0),
            p(2, "b", "x", 1.0, 5.0),
            p(3, "c", "x", 1.0, 4.0),
            p(4, "d", "x", 1.0, 5.0),
        ];
        let q = Query::new("").with_sort_mode(SortMode::RatingDesc);
        assert_eq!(ranked(&catalog, &q), vec![2, 4, 1, 3]);
    }

    #[test]
    fn empty_relevance_query_orders_by_rating() {
        let catalog = vec![
            p(1, "a", "x", 1.0, 3.0),
            p(2, "b", "x", 1.0, 5.0),
            p(3, "c", "x", 1.0, 3.0),
        ];
        assert_eq!(ranked(&catalog, &Query::default()), vec![2, 1, 3]);
    }

    #[test]
    fn exact_name_beats_prefix_and_rating() {
        let catalog = vec![
            p(1, "Polo Shirt", "Zara", 30.0, 5.0),
            p(2, "Polo", "Zara", 20.0, 1.0),
        ];
        // both reach ranking; the exact name wins over a higher-rated prefix match
        assert_eq!(filter_catalog(&catalog, &Query::new("polo")).len(), 2);
        assert_eq!(ranked(&catalog, &Query::new("POLO")), vec![2, 1]);
    }

    #[test]
    fn prefix_beats_brand_beats_rating() {
        let catalog = vec![
            p(1, "Classic Polo", "Polo", 1.0, 5.0),
            p(2, "Polo Shirt", "Zara", 1.0, 3.0),
            p(3, "Sport Polo", "Nike", 1.0, 5.0),
            p(4, "Knit Polo", "Nike", 1.0, 4.0),
        ];
        assert_eq!(ranked(&catalog, &Query::new("polo")), vec![2, 1, 3, 4]);
    }

    #[test]
    fn full_ties_keep_catalog_order() {
        let catalog = vec![
            p(1, "Blue Tee", "Zara", 1.0, 4.0),
            p(2, "Navy Tee", "Zara", 1.0, 4.0),
            p(3, "Grey Tee", "Zara", 1.0, 4.0),
        ];
        assert_eq!(ranked(&catalog, &Query::new("tee")), vec![1, 2, 3]);
    }
}
