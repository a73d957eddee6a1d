//! Wishlists service.

use std::{convert::Infallible, sync::Arc};

use async_trait::async_trait;
use boutique::{
    items::WishlistItem,
    products::{ProductId, ProductSnapshot},
    wishlist::Wishlist,
};
use mockall::automock;
use tracing::{debug, warn};

use crate::domain::{
    catalog::{CatalogService, CatalogServiceError},
    identity::IdentityService,
    local::LocalStore,
    remote::RemoteStore,
    sync::{SyncReport, SyncStatus, SyncedList, WishlistCollection},
    wishlists::errors::WishlistsServiceError,
};

/// Result of toggling a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    /// Whether the product is on the wishlist afterwards
    pub wishlisted: bool,

    /// Remote outcome of the change
    pub status: SyncStatus,
}

/// Wishlist of the current session.
pub struct SessionWishlistsService {
    catalog: Arc<dyn CatalogService>,
    list: SyncedList<WishlistCollection>,
}

impl SessionWishlistsService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        identity: Arc<dyn IdentityService>,
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStore>,
    ) -> Self {
        Self {
            catalog,
            list: SyncedList::new(WishlistCollection::new(remote, local), identity),
        }
    }

    async fn resolve(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductSnapshot, WishlistsServiceError> {
        match self.catalog.get_product(product_id).await {
            Ok(snapshot) if snapshot.display.validate().is_ok() => Ok(snapshot),
            Ok(_) | Err(CatalogServiceError::NotFound) => {
                Err(WishlistsServiceError::SnapshotMissing(product_id.clone()))
            }
            Err(CatalogServiceError::Unavailable(reason)) => {
                warn!(product = %product_id, %reason, "catalog unavailable");

                Err(WishlistsServiceError::SnapshotMissing(product_id.clone()))
            }
        }
    }

    async fn insert(&self, product_id: ProductId) -> Result<SyncStatus, WishlistsServiceError> {
        let snapshot = self.resolve(&product_id).await?;

        debug!(product = %product_id, "adding to wishlist");

        self.list
            .mutate(|wishlist| {
                Ok::<_, WishlistsServiceError>(
                    wishlist.insert(WishlistItem::new(product_id, &snapshot)),
                )
            })
            .await
    }
}

#[async_trait]
impl WishlistsService for SessionWishlistsService {
    async fn wishlist(&self) -> Wishlist {
        self.list.read(Wishlist::clone).await
    }

    async fn items(&self) -> Vec<WishlistItem> {
        self.list.items().await
    }

    async fn contains(&self, product_id: &ProductId) -> bool {
        self.list.read(|wishlist| wishlist.contains(product_id)).await
    }

    async fn add_item(&self, product_id: ProductId) -> Result<SyncStatus, WishlistsServiceError> {
        if self.contains(&product_id).await {
            return Ok(SyncStatus::Unchanged);
        }

        self.insert(product_id).await
    }

    async fn remove_item(&self, product_id: &ProductId) -> SyncStatus {
        debug!(product = %product_id, "removing from wishlist");

        let Ok(status) = self
            .list
            .mutate(|wishlist| Ok::<_, Infallible>(wishlist.remove(product_id).is_some()))
            .await;

        status
    }

    async fn toggle(&self, product_id: ProductId) -> Result<Toggled, WishlistsServiceError> {
        if self.contains(&product_id).await {
            let status = self.remove_item(&product_id).await;

            return Ok(Toggled {
                wishlisted: false,
                status,
            });
        }

        let status = self.insert(product_id).await?;

        Ok(Toggled {
            wishlisted: true,
            status,
        })
    }

    async fn sync_with_remote(&self) -> Result<SyncReport<WishlistItem>, WishlistsServiceError> {
        self.list.sync_with_remote().await.map_err(|error| {
            warn!(?error, "wishlist sync failed");

            WishlistsServiceError::from(error)
        })
    }

    async fn has_unsynced_changes(&self) -> bool {
        self.list.is_dirty().await
    }

    async fn restore(&self) {
        self.list.restore().await;
    }

    async fn detach_remote(&self) {
        self.list.detach().await;
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// The current wishlist.
    async fn wishlist(&self) -> Wishlist;

    /// The best-known list of entries, for rendering.
    async fn items(&self) -> Vec<WishlistItem>;

    /// Whether the product is on the wishlist.
    async fn contains(&self, product_id: &ProductId) -> bool;

    /// Add a product; adding one already present changes nothing.
    async fn add_item(&self, product_id: ProductId) -> Result<SyncStatus, WishlistsServiceError>;

    /// Remove a product; removing one not present changes nothing.
    async fn remove_item(&self, product_id: &ProductId) -> SyncStatus;

    /// Remove the product if present, add it otherwise.
    async fn toggle(&self, product_id: ProductId) -> Result<Toggled, WishlistsServiceError>;

    /// Merge with the signed-in user's stored wishlist and store the result on both sides.
    async fn sync_with_remote(&self) -> Result<SyncReport<WishlistItem>, WishlistsServiceError>;

    /// Whether changes have not reached the stored copy yet.
    async fn has_unsynced_changes(&self) -> bool;

    /// Merge in the copy saved on the device.
    async fn restore(&self);

    /// Stop mirroring to the previous user's stored copy.
    async fn detach_remote(&self);
}
