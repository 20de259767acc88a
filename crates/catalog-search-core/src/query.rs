//! Search query model and normalizer
//!
//! [`Query`] is the primary input to [`SearchEngine::search`]. It is assembled
//! either through the builder methods or from raw UI control values via
//! [`Query::from_filter_state`], which never fails: values no predicate family
//! understands are dropped so that family passes everything.
//!
//! [`SearchEngine::search`]: crate::engine::SearchEngine::search

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::EngineError;

/// Lowercase and trim raw input text.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Result ordering requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Name/brand match tie-breaks, then rating
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
    RatingDesc,
    /// Most recently added to the catalog first
    Newest,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relevance => write!(f, "relevance"),
            Self::PriceAsc => write!(f, "price-asc"),
            Self::PriceDesc => write!(f, "price-desc"),
            Self::NameAsc => write!(f, "name-asc"),
            Self::RatingDesc => write!(f, "rating-desc"),
            Self::Newest => write!(f, "newest"),
        }
    }
}

impl FromStr for SortMode {
    type Err = EngineError;

    /// Accepts both the canonical names and the storefront's select values
    /// (`price-low`, `price-high`, `name-az`, `rating`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "relevance" => Ok(Self::Relevance),
            "price-asc" | "price-low" => Ok(Self::PriceAsc),
            "price-desc" | "price-high" => Ok(Self::PriceDesc),
            "name-asc" | "name-az" => Ok(Self::NameAsc),
            "rating-desc" | "rating" => Ok(Self::RatingDesc),
            "newest" => Ok(Self::Newest),
            _ => Err(EngineError::unknown("sort", s)),
        }
    }
}

/// Coarse price band selectable from a dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    /// `0 <= price <= 50`
    #[serde(rename = "under-50")]
    Under50,
    /// `50 < price <= 100`
    #[serde(rename = "50-100")]
    From50To100,
    /// `100 < price <= 200`
    #[serde(rename = "100-200")]
    From100To200,
    /// `price > 200`
    #[serde(rename = "200-plus")]
    Over200,
}

impl PriceBucket {
    /// Whether `price` falls inside this band.
    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::Under50 => (0.0..=50.0).contains(&price),
            Self::From50To100 => price > 50.0 && price <= 100.0,
            Self::From100To200 => price > 100.0 && price <= 200.0,
            Self::Over200 => price > 200.0,
        }
    }
}

impl FromStr for PriceBucket {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0-50" | "under-50" => Ok(Self::Under50),
            "50-100" => Ok(Self::From50To100),
            "100-200" => Ok(Self::From100To200),
            "200+" | "200-plus" => Ok(Self::Over200),
            _ => Err(EngineError::unknown("price bucket", s)),
        }
    }
}

/// Inclusive explicit price range (slider filter)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Build a range; `min > max` is swapped rather than rejected.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min > max {
            let err = EngineError::InvalidPriceRange { min, max };
            tracing::debug!(error = %err, "swapping inverted price range");
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// A structured search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Query {
    /// Text exactly as typed
    pub raw_text: String,
    /// Trimmed, lowercased `raw_text`
    pub normalized_text: String,
    /// Exact category filter
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
    /// Case-insensitive exact brand filter
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price_bucket: Option<PriceBucket>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price_range: Option<PriceRange>,
    /// Minimum-rating checkboxes (1–5); a product passes if it meets any
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub rating_thresholds: BTreeSet<u8>,
    #[serde(default)]
    pub in_stock_only: bool,
    #[serde(default)]
    pub on_sale_only: bool,
    #[serde(default)]
    pub sort_mode: SortMode,
}

impl Query {
    /// Create a text query with every filter unset and relevance ordering
    #[must_use]
    pub fn new(raw_text: impl Into<String>) -> Self {
        let mut query = Self::default();
        query.set_text(raw_text);
        query
    }

    /// Replace the text, keeping every other filter.
    pub fn set_text(&mut self, raw_text: impl Into<String>) {
        self.raw_text = raw_text.into();
        self.normalized_text = normalize_text(&self.raw_text);
    }

    /// Set the category filter; blank input clears it.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(category.into());
        self
    }

    /// Set the brand filter; blank input clears it.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = non_blank(brand.into());
        self
    }

    #[must_use]
    pub const fn with_price_bucket(mut self, bucket: PriceBucket) -> Self {
        self.price_bucket = Some(bucket);
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    /// Add rating thresholds; values outside 1–5 are ignored.
    #[must_use]
    pub fn with_rating_thresholds(mut self, thresholds: impl IntoIterator<Item = u8>) -> Self {
        self.rating_thresholds
            .extend(thresholds.into_iter().filter(|t| (1..=5).contains(t)));
        self
    }

    #[must_use]
    pub const fn with_in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    #[must_use]
    pub const fn with_on_sale_only(mut self, on_sale_only: bool) -> Self {
        self.on_sale_only = on_sale_only;
        self
    }

    #[must_use]
    pub const fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Assemble a query from raw UI control values. Never fails.
    #[must_use]
    pub fn from_filter_state(state: &FilterState) -> Self {
        let mut query = Self::new(state.text.clone())
            .with_category(state.category.trim())
            .with_brand(state.brand.trim())
            .with_in_stock_only(state.in_stock_only)
            .with_on_sale_only(state.on_sale_only);

        if !state.price_bucket.trim().is_empty() {
            match state.price_bucket.parse::<PriceBucket>() {
                Ok(bucket) => query.price_bucket = Some(bucket),
                Err(err) => tracing::debug!(error = %err, "price bucket fails open"),
            }
        }

        if state.min_price.is_some() || state.max_price.is_some() {
            let min = state.min_price.unwrap_or(0.0);
            let max = state.max_price.unwrap_or(f64::MAX);
            query.price_range = Some(PriceRange::new(min, max));
        }

        for raw in &state.ratings {
            match raw.trim().parse::<u8>() {
                Ok(t) if (1..=5).contains(&t) => {
                    query.rating_thresholds.insert(t);
                }
                _ => {
                    let err = EngineError::unknown("rating", raw);
                    tracing::debug!(error = %err, "rating threshold ignored");
                }
            }
        }

        query.sort_mode = state.sort.parse().unwrap_or_else(|err: EngineError| {
            tracing::debug!(error = %err, "falling back to relevance ordering");
            SortMode::Relevance
        });

        query
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Raw values of the search page's controls, as the UI layer reads them
///
/// Empty strings mean "unset" for the dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub text: String,
    pub category: String,
    pub brand: String,
    pub price_bucket: String,
    pub sort: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Values of the checked rating checkboxes
    pub ratings: Vec<String>,
    pub in_stock_only: bool,
    pub on_sale_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_text("  Red SHIRT \t"), "red shirt");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn query_builder_defaults() {
        let q = Query::new("  Nike ");
        assert_eq!(q.raw_text, "  Nike ");
        assert_eq!(q.normalized_text, "nike");
        assert_eq!(q.sort_mode, SortMode::Relevance);
        assert!(q.category.is_none());
        assert!(q.brand.is_none());
        assert!(q.rating_thresholds.is_empty());
        assert!(!q.in_stock_only);
    }

    #[test]
    fn blank_category_and_brand_clear_the_filter() {
        let q = Query::new("").with_category("  ").with_brand("");
        assert!(q.category.is_none());
        assert!(q.brand.is_none());
    }

    #[test]
    fn rating_thresholds_out_of_range_are_dropped() {
        let q = Query::new("").with_rating_thresholds([0, 3, 5, 9]);
        assert_eq!(q.rating_thresholds.into_iter().collect::<Vec<_>>(), vec![3, 5]);
    }

    #[test]
    fn inverted_price_range_is_swapped() {
        let range = PriceRange::new(200.0, 50.0);
        assert!((range.min - 50.0).abs() < f64::EPSILON);
        assert!((range.max - 200.0).abs() < f64::EPSILON);
        assert!(range.contains(50.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(200.01));
    }

    #[test]
    fn bucket_bounds() {
        assert!(PriceBucket::Under50.contains(0.0));
        assert!(PriceBucket::Under50.contains(50.0));
        assert!(!PriceBucket::From50To100.contains(50.0));
        assert!(PriceBucket::From50To100.contains(100.0));
        assert!(!PriceBucket::From100To200.contains(100.0));
        assert!(PriceBucket::From100To200.contains(200.0));
        assert!(!PriceBucket::Over200.contains(200.0));
        assert!(PriceBucket::Over200.contains(200.5));
    }

    #[test]
    fn sort_mode_accepts_storefront_aliases() {
        assert_eq!("price-low".parse::<SortMode>().unwrap(), SortMode::PriceAsc);
        assert_eq!("price-high".parse::<SortMode>().unwrap(), SortMode::PriceDesc);
        assert_eq!("name-az".parse::<SortMode>().unwrap(), SortMode::NameAsc);
        assert_eq!("rating".parse::<SortMode>().unwrap(), SortMode::RatingDesc);
        assert_eq!("".parse::<SortMode>().unwrap(), SortMode::Relevance);
        assert!("popularity".parse::<SortMode>().is_err());
    }

    #[test]
    fn sort_mode_display_roundtrips_through_from_str() {
        for mode in [
            SortMode::Relevance,
            SortMode::PriceAsc,
            SortMode::PriceDesc,
            SortMode::NameAsc,
            SortMode::RatingDesc,
            SortMode::Newest,
        ] {
            assert_eq!(mode.to_string().parse::<SortMode>().unwrap(), mode);
        }
    }

    #[test]
    fn filter_state_unknown_values_fail_open() {
        let state = FilterState {
            text: "Shirt".into(),
            price_bucket: "cheap-ish".into(),
            sort: "popularity".into(),
            ratings: vec!["4".into(), "six".into(), "0".into()],
            ..FilterState::default()
        };
        let q = Query::from_filter_state(&state);
        assert_eq!(q.normalized_text, "shirt");
        assert!(q.price_bucket.is_none());
        assert_eq!(q.sort_mode, SortMode::Relevance);
        assert_eq!(q.rating_thresholds.into_iter().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn filter_state_full_assembly() {
        let state = FilterState {
            text: " Red ".into(),
            category: "shirts".into(),
            brand: "nike".into(),
            price_bucket: "50-100".into(),
            sort: "price-low".into(),
            min_price: Some(120.0),
            max_price: Some(60.0),
            ratings: vec!["5".into()],
            in_stock_only: true,
            on_sale_only: true,
        };
        let q = Query::from_filter_state(&state);
        assert_eq!(q.category.as_deref(), Some("shirts"));
        assert_eq!(q.brand.as_deref(), Some("nike"));
        assert_eq!(q.price_bucket, Some(PriceBucket::From50To100));
        assert_eq!(q.price_range, Some(PriceRange { min: 60.0, max: 120.0 }));
        assert_eq!(q.sort_mode, SortMode::PriceAsc);
        assert!(q.in_stock_only && q.on_sale_only);
    }

    #[test]
    fn half_open_slider_gets_wide_bounds() {
        let state = FilterState {
            max_price: Some(90.0),
            ..FilterState::default()
        };
        let q = Query::from_filter_state(&state);
        let range = q.price_range.unwrap();
        assert!(range.contains(0.0));
        assert!(!range.contains(90.5));
    }

    #[test]
    fn query_serde_roundtrip() {
        let q = Query::new("floral")
            .with_price_bucket(PriceBucket::Over200)
            .with_rating_thresholds([4])
            .with_sort_mode(SortMode::Newest);
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"200-plus\""));
        assert!(json.contains("\"newest\""));
        let q2: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(q2, q);
    }
}
