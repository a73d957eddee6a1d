//! Catalog service.

use async_trait::async_trait;
use boutique::{
    catalog::ProductListing,
    products::{ProductId, ProductSnapshot},
};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::domain::catalog::errors::CatalogServiceError;

/// Catalog held in memory, e.g. the products already loaded for a listing page.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<FxHashMap<ProductId, ProductSnapshot>>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the snapshot of every listing.
    #[must_use]
    pub fn from_listings(listings: &[ProductListing]) -> Self {
        let products = listings
            .iter()
            .map(|listing| (listing.id.clone(), listing.snapshot()))
            .collect();

        Self {
            products: RwLock::new(products),
        }
    }

    /// Insert or replace a product.
    pub async fn put_product(&self, product_id: ProductId, snapshot: ProductSnapshot) {
        self.products.write().await.insert(product_id, snapshot);
    }

    /// Remove a product, e.g. after it was delisted.
    pub async fn remove_product(&self, product_id: &ProductId) -> Option<ProductSnapshot> {
        self.products.write().await.remove(product_id)
    }
}

#[async_trait]
impl CatalogService for MemoryCatalog {
    async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductSnapshot, CatalogServiceError> {
        self.products
            .read()
            .await
            .get(product_id)
            .cloned()
            .ok_or(CatalogServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Look up the current snapshot of a product.
    async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductSnapshot, CatalogServiceError>;
}
