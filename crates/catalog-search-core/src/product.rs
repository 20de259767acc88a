//! Product model for the catalog snapshot
//!
//! Products are owned by the catalog accessor. The engine only ever holds
//! shared [`ProductRef`] handles and never mutates them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Unique identifier for a product in the catalog
pub type ProductId = i64;

/// Shared, immutable handle to a product in a catalog snapshot
pub type ProductRef = Arc<Product>;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique ID within the catalog
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Brand name as displayed (case preserved)
    pub brand: String,
    /// Category slug, matched exactly
    pub category: String,
    /// Current price, never negative
    pub price: f64,
    /// Price before discount (equal to `price` when not discounted)
    pub original_price: f64,
    /// Average rating on a 0–5 scale
    pub rating: f32,
    pub in_stock: bool,
    pub on_sale: bool,
    /// Distinct lowercase tags, in the order they were assigned
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Create a product with the given id and name; every other field takes a
    /// neutral default (free, unrated, in stock, not on sale, untagged).
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            brand: String::new(),
            category: String::new(),
            price: 0.0,
            original_price: 0.0,
            rating: 0.0,
            in_stock: true,
            on_sale: false,
            tags: Vec::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the price. Negative input is clamped to zero and the original
    /// price is raised to match if it was lower.
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price.max(0.0);
        self.original_price = self.original_price.max(self.price);
        self
    }

    /// Set the pre-discount price; never below the current price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = original_price.max(self.price);
        self
    }

    /// Set the rating, clamped to `0.0..=5.0`.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    #[must_use]
    pub const fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    #[must_use]
    pub const fn with_on_sale(mut self, on_sale: bool) -> Self {
        self.on_sale = on_sale;
        self
    }

    /// Replace the tag set. Tags are lowercased and deduplicated, keeping the
    /// first occurrence.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.as_ref().trim().to_lowercase();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wrap into a shared handle for a catalog snapshot.
    #[must_use]
    pub fn into_ref(self) -> ProductRef {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let p = Product::new(1, "Plain Tee");
        assert_eq!(p.id, 1);
        assert_eq!(p.name, "Plain Tee");
        assert!(p.in_stock);
        assert!(!p.on_sale);
        assert!(p.tags.is_empty());
        assert!((p.price - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_invariants_hold() {
        let p = Product::new(1, "x").with_price(-5.0);
        assert!((p.price - 0.0).abs() < f64::EPSILON);

        let p = Product::new(1, "x").with_price(80.0).with_original_price(60.0);
        assert!((p.original_price - 80.0).abs() < f64::EPSILON);

        let p = Product::new(1, "x").with_original_price(100.0).with_price(120.0);
        assert!((p.original_price - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rating_is_clamped() {
        assert!((Product::new(1, "x").with_rating(7.5).rating - 5.0).abs() < f32::EPSILON);
        assert!((Product::new(1, "x").with_rating(-1.0).rating).abs() < f32::EPSILON);
    }

    #[test]
    fn tags_are_lowercased_and_distinct() {
        let p = Product::new(1, "x").with_tags(["Summer", "cotton", "SUMMER", " ", "Cotton "]);
        assert_eq!(p.tags, vec!["summer", "cotton"]);
    }

    #[test]
    fn serde_uses_camel_case() {
        let p = Product::new(7, "Polo")
            .with_price(95.0)
            .with_in_stock(false);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["originalPrice"], 95.0);
        assert_eq!(json["inStock"], false);

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
