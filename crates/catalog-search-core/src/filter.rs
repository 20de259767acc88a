//! Predicate pipeline over a catalog snapshot
//!
//! Each non-empty field of a [`Query`] activates one predicate family:
//! - text — substring of name, brand, description or any tag
//! - `category` — exact match
//! - `brand` — case-insensitive exact match
//! - price — bucket AND explicit range (both when both are set)
//! - `rating_thresholds` — product meets at least one threshold
//! - `in_stock_only` / `on_sale_only` — flag must be set on the product
//!
//! Families combine with AND semantics. Output preserves catalog order.

use crate::product::{Product, ProductRef};
use crate::query::Query;

/// A product that passed every active predicate, tagged with its position
/// in the catalog snapshot (insertion order, used by the `newest` sort).
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub position: usize,
    pub product: &'a ProductRef,
}

/// Run every active predicate over `catalog` in one pass.
#[must_use]
pub fn filter_catalog<'a>(catalog: &'a [ProductRef], query: &Query) -> Vec<Candidate<'a>> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, product)| matches(product, query))
        .map(|(position, product)| Candidate { position, product })
        .collect()
}

/// Whether `product` satisfies every active predicate of `query`.
#[must_use]
pub fn matches(product: &Product, query: &Query) -> bool {
    text_matches(product, &query.normalized_text)
        && category_matches(product, query)
        && brand_matches(product, query)
        && price_matches(product, query)
        && rating_matches(product, query)
        && (!query.in_stock_only || product.in_stock)
        && (!query.on_sale_only || product.on_sale)
}

fn text_matches(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains_ci(&product.name, needle)
        || contains_ci(&product.brand, needle)
        || contains_ci(&product.description, needle)
        || product.tags.iter().any(|tag| contains_ci(tag, needle))
}

/// `needle` must already be lowercase.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn category_matches(product: &Product, query: &Query) -> bool {
    query
        .category
        .as_deref()
        .is_none_or(|category| product.category == category)
}

fn brand_matches(product: &Product, query: &Query) -> bool {
    query
        .brand
        .as_deref()
        .is_none_or(|brand| product.brand.to_lowercase() == brand.to_lowercase())
}

// Bucket and slider range both constrain price; a conflicting pair yields an
// empty result.
fn price_matches(product: &Product, query: &Query) -> bool {
    let in_bucket = query
        .price_bucket
        .is_none_or(|bucket| bucket.contains(product.price));
    let in_range = query
        .price_range
        .is_none_or(|range| range.contains(product.price));
    in_bucket && in_range
}

fn rating_matches(product: &Product, query: &Query) -> bool {
    query.rating_thresholds.is_empty()
        || query
            .rating_thresholds
            .iter()
            .any(|&threshold| product.rating >= f32::from(threshold))
}

/// Whether the query narrows the catalog at all.
#[must_use]
pub fn has_active_filters(query: &Query) -> bool {
    active_filter_count(query) > 0
}

/// Count the active predicate families (text included).
#[must_use]
pub fn active_filter_count(query: &Query) -> usize {
    let mut count = 0;
    if !query.normalized_text.is_empty() {
        count += 1;
    }
    if query.category.is_some() {
        count += 1;
    }
    if query.brand.is_some() {
        count += 1;
    }
    if query.price_bucket.is_some() || query.price_range.is_some() {
        count += 1;
    }
    if !query.rating_thresholds.is_empty() {
        count += 1;
    }
    if query.in_stock_only {
        count += 1;
    }
    if query.on_sale_only {
        count += 1;
    }
    count
}
