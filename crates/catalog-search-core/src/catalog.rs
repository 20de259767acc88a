//! Catalog accessors
//!
//! The engine reads a fresh snapshot from a [`CatalogAccessor`] on every
//! evaluation; it never caches products across evaluations, so edits made
//! elsewhere become visible on the next search.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::product::{Product, ProductId, ProductRef};
use crate::store::KeyValueStore;

/// Store key under which the admin panel keeps its product records.
pub const ADMIN_PRODUCTS_KEY: &str = "adminProducts";

/// Supplier of the current product list.
pub trait CatalogAccessor {
    /// Read the full current product list.
    ///
    /// `None` means no catalog is available at all; the engine treats that
    /// the same as an empty catalog.
    fn snapshot(&self) -> Option<Vec<ProductRef>>;
}

impl<C: CatalogAccessor + ?Sized> CatalogAccessor for &C {
    fn snapshot(&self) -> Option<Vec<ProductRef>> {
        (**self).snapshot()
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductRef>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(Product::into_ref).collect(),
        }
    }

    #[must_use]
    pub const fn from_refs(products: Vec<ProductRef>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogAccessor for StaticCatalog {
    fn snapshot(&self) -> Option<Vec<ProductRef>> {
        Some(self.products.clone())
    }
}

/// A product record as the admin panel persists it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
}

/// Markup assumed when an admin record carries no original price.
const DEFAULT_MARKUP: f64 = 1.2;

impl AdminProductRecord {
    /// Only `active` records are sellable.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Derive the storefront view of this record.
    ///
    /// - `in_stock` is `stock > 0`
    /// - a missing original price is taken as `price * 1.2`, so such records
    ///   count as on sale
    /// - missing tags default to `[category, lowercase(brand)]`
    #[must_use]
    pub fn into_product(self) -> Product {
        let original_price = self.original_price.unwrap_or(self.price * DEFAULT_MARKUP);
        let on_sale = self.price < original_price;
        let tags = self
            .tags
            .unwrap_or_else(|| vec![self.category.clone(), self.brand.to_lowercase()]);

        Product::new(self.id, self.name)
            .with_brand(self.brand)
            .with_category(self.category)
            .with_price(self.price)
            .with_original_price(original_price)
            .with_rating(self.rating.unwrap_or(0.0))
            .with_in_stock(self.stock > 0)
            .with_on_sale(on_sale)
            .with_tags(tags)
            .with_description(self.description)
    }
}

/// Catalog read from admin-managed records in a key-value store.
///
/// Each snapshot re-reads the store. When the key is missing the optional
/// fallback catalog is served; unparsable JSON is logged and treated as an
/// absent catalog.
pub struct StoredCatalog<S> {
    store: S,
    key: String,
    fallback: Option<Vec<ProductRef>>,
}

impl<S: KeyValueStore> StoredCatalog<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: ADMIN_PRODUCTS_KEY.to_owned(),
            fallback: None,
        }
    }

    /// Read records from `key` instead of [`ADMIN_PRODUCTS_KEY`].
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Serve `products` while the admin panel has never saved a catalog.
    #[must_use]
    pub fn with_fallback(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        self.fallback = Some(products.into_iter().map(Product::into_ref).collect());
        self
    }

    fn parse(&self, raw: &str) -> EngineResult<Vec<ProductRef>> {
        let records: Vec<AdminProductRecord> =
            serde_json::from_str(raw).map_err(|e| EngineError::malformed(&self.key, e))?;
        Ok(records
            .into_iter()
            .filter(AdminProductRecord::is_active)
            .map(|record| record.into_product().into_ref())
            .collect())
    }
}

impl<S: KeyValueStore> CatalogAccessor for StoredCatalog<S> {
    fn snapshot(&self) -> Option<Vec<ProductRef>> {
        let Some(raw) = self.store.get(&self.key) else {
            return self.fallback.clone();
        };
        match self.parse(&raw) {
            Ok(products) => Some(products),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    error_type = err.error_type(),
                    "ignoring unreadable admin catalog"
                );
                None
            }
        }
    }
}
