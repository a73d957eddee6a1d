//! Carts service.

use std::{convert::Infallible, sync::Arc};

use async_trait::async_trait;
use boutique::{
    attributes::SelectedAttributes,
    cart::{Cart, CartError},
    items::CartLineItem,
    products::{ProductId, ProductSnapshot},
};
use mockall::automock;
use tracing::{debug, warn};

use crate::domain::{
    carts::errors::CartsServiceError,
    catalog::{CatalogService, CatalogServiceError},
    identity::IdentityService,
    local::LocalStore,
    remote::RemoteStore,
    sync::{CartCollection, SyncReport, SyncStatus, SyncedList},
};

/// Attempts made to store an emptied cart remotely.
const CLEAR_ATTEMPTS: u32 = 2;

/// Cart of the current session, mirrored to the device and the signed-in user's stored copy.
pub struct SessionCartsService {
    catalog: Arc<dyn CatalogService>,
    list: SyncedList<CartCollection>,
}

impl SessionCartsService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        identity: Arc<dyn IdentityService>,
        remote: Arc<dyn RemoteStore>,
        local: Arc<dyn LocalStore>,
    ) -> Self {
        Self {
            catalog,
            list: SyncedList::new(CartCollection::new(remote, local), identity),
        }
    }

    async fn resolve(&self, product_id: &ProductId) -> Result<ProductSnapshot, CartsServiceError> {
        let snapshot = match self.catalog.get_product(product_id).await {
            Ok(snapshot) => snapshot,
            Err(CatalogServiceError::NotFound) => {
                return Err(CartsServiceError::SnapshotMissing(product_id.clone()));
            }
            Err(CatalogServiceError::Unavailable(reason)) => {
                warn!(product = %product_id, %reason, "catalog unavailable");

                return Err(CartsServiceError::SnapshotMissing(product_id.clone()));
            }
        };

        snapshot
            .validate()
            .map_err(|_| CartsServiceError::SnapshotMissing(product_id.clone()))?;

        Ok(snapshot)
    }
}

#[async_trait]
impl CartsService for SessionCartsService {
    async fn cart(&self) -> Cart {
        self.list.read(Cart::clone).await
    }

    async fn items(&self) -> Vec<CartLineItem> {
        self.list.items().await
    }

    async fn add_item(
        &self,
        product_id: ProductId,
        quantity: u32,
        attributes: SelectedAttributes,
    ) -> Result<SyncStatus, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let snapshot = self.resolve(&product_id).await?;

        debug!(product = %product_id, quantity, %attributes, "adding to cart");

        self.list
            .mutate(|cart| {
                cart.add_item(product_id.clone(), &snapshot, quantity, attributes)
                    .map(|_| true)
                    .map_err(|error| CartsServiceError::from_cart(error, &product_id))
            })
            .await
    }

    async fn update_quantity(
        &self,
        index: usize,
        quantity: u32,
    ) -> Result<SyncStatus, CartsServiceError> {
        debug!(index, quantity, "updating cart quantity");

        self.list
            .mutate(|cart| {
                cart.update_quantity(index, quantity)
                    .map(|()| true)
                    .map_err(|error| match error {
                        CartError::ItemNotFound(index) => CartsServiceError::ItemNotFound(index),
                        CartError::InvalidQuantity | CartError::InvalidSnapshot(_) => {
                            CartsServiceError::InvalidQuantity
                        }
                    })
            })
            .await
    }

    async fn remove_item(&self, index: usize) -> SyncStatus {
        let Ok(status) = self
            .list
            .mutate(|cart| Ok::<_, Infallible>(cart.remove_item(index).is_some()))
            .await;

        status
    }

    async fn sync_with_remote(&self) -> Result<SyncReport<CartLineItem>, CartsServiceError> {
        self.list.sync_with_remote().await.map_err(|error| {
            warn!(?error, "cart sync failed");

            CartsServiceError::from(error)
        })
    }

    async fn clear_cart(&self) -> SyncStatus {
        debug!("clearing cart");

        self.list.overwrite(Cart::clear, CLEAR_ATTEMPTS).await
    }

    async fn remove_ordered(&self, ordered: &[CartLineItem]) -> SyncStatus {
        debug!(lines = ordered.len(), "removing ordered lines");

        self.list
            .overwrite(
                |cart| {
                    cart.remove_ordered(ordered);
                },
                CLEAR_ATTEMPTS,
            )
            .await
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
pub trait CartsService: Send + Sync {
    /// The current cart.
    async fn cart(&self) -> Cart;

    /// The best-known list of cart lines, for rendering.
    async fn items(&self) -> Vec<CartLineItem>;

    /// Add a product, or increase the quantity of the line with the same attributes.
    async fn add_item(
        &self,
        product_id: ProductId,
        quantity: u32,
        attributes: SelectedAttributes,
    ) -> Result<SyncStatus, CartsServiceError>;

    /// Replace the quantity of the line at `index`.
    async fn update_quantity(
        &self,
        index: usize,
        quantity: u32,
    ) -> Result<SyncStatus, CartsServiceError>;

    /// Remove the line at `index`; out of range positions change nothing.
    async fn remove_item(&self, index: usize) -> SyncStatus;

    /// Merge with the signed-in user's stored cart and store the result on both sides.
    async fn sync_with_remote(&self) -> Result<SyncReport<CartLineItem>, CartsServiceError>;

    /// Empty the cart, here and in the signed-in user's stored copy.
    async fn clear_cart(&self) -> SyncStatus;

    /// Take ordered lines out of the cart, here and in the signed-in user's stored copy.
    /// Lines added since the order was taken are kept.
    async fn remove_ordered(&self, ordered: &[CartLineItem]) -> SyncStatus;

    /// Whether changes have not reached the stored copy yet.
    async fn has_unsynced_changes(&self) -> bool;

    /// Merge in the copy saved on the device.
    async fn restore(&self);

    /// Stop mirroring to the previous user's stored copy.
    async fn detach_remote(&self);
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::catalog::MockCatalogService,
        test::{TestContext, helpers::red},
    };

    #[tokio::test]
    async fn guest_add_stays_local() -> TestResult {
        let ctx = TestContext::new().await;

        let status = ctx.carts.add_item("lawn-suit".into(), 1, red()).await?;

        assert_eq!(status, SyncStatus::LocalOnly);
        assert_eq!(ctx.carts.items().await.len(), 1);
        assert_eq!(ctx.local_cart().await.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_key_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.add_item("lawn-suit".into(), 1, red()).await?;
        ctx.carts.add_item("lawn-suit".into(), 2, red()).await?;
        ctx.carts
            .add_item("lawn-suit".into(), 1, SelectedAttributes::new())
            .await?;

        let items = ctx.carts.items().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items.first().map(|item| item.quantity().get()), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn price_is_captured_at_add_time() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.add_item("hijab".into(), 1, red()).await?;
        ctx.set_price("hijab", Decimal::from(1500)).await;
        ctx.carts.add_item("hijab".into(), 1, red()).await?;

        let items = ctx.carts.items().await;

        assert_eq!(
            items.first().map(CartLineItem::price_at_add),
            Some(Decimal::from(900))
        );

        Ok(())
    }

    #[tokio::test]
    async fn price_survives_quantity_update_after_catalog_change() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.add_item("hijab".into(), 1, red()).await?;
        ctx.set_price("hijab", Decimal::from(1200)).await;
        ctx.carts.update_quantity(0, 3).await?;

        let items = ctx.carts.items().await;
        let line = items.first().ok_or("cart is empty")?;

        assert_eq!(line.quantity().get(), 3);
        assert_eq!(line.price_at_add(), Decimal::from(900));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_snapshot_missing() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.add_item("missing".into(), 1, red()).await;

        assert!(
            matches!(result, Err(CartsServiceError::SnapshotMissing(ref id)) if id.as_str() == "missing"),
            "expected SnapshotMissing, got {result:?}"
        );
        assert!(ctx.carts.items().await.is_empty());
    }

    #[tokio::test]
    async fn unavailable_catalog_is_snapshot_missing() {
        let mut catalog = MockCatalogService::new();
        catalog
            .expect_get_product()
            .returning(|_| Err(CatalogServiceError::Unavailable("timeout".to_string())));

        let ctx = TestContext::with_catalog(Arc::new(catalog)).await;

        let result = ctx.carts.add_item("hijab".into(), 1, red()).await;

        assert!(
            matches!(result, Err(CartsServiceError::SnapshotMissing(_))),
            "expected SnapshotMissing, got {result:?}"
        );
    }

    #[tokio::test]
    async fn zero_quantity_never_reaches_catalog() {
        let mut catalog = MockCatalogService::new();
        catalog.expect_get_product().never();

        let ctx = TestContext::with_catalog(Arc::new(catalog)).await;

        let result = ctx.carts.add_item("hijab".into(), 0, red()).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_quantity_floor_is_one() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 2, red()).await?;

        let result = ctx.carts.update_quantity(0, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
        assert_eq!(
            ctx.carts.items().await.first().map(|item| item.quantity().get()),
            Some(2)
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_out_of_range_is_item_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.update_quantity(5, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound(5))),
            "expected ItemNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_out_of_range_is_noop() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;

        assert_eq!(ctx.carts.remove_item(9).await, SyncStatus::Unchanged);
        assert_eq!(ctx.carts.items().await.len(), 1);
        assert_eq!(ctx.carts.remove_item(0).await, SyncStatus::LocalOnly);
        assert!(ctx.carts.items().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn sync_requires_sign_in() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.sync_with_remote().await;

        assert!(
            matches!(result, Err(CartsServiceError::NotSignedIn)),
            "expected NotSignedIn, got {result:?}"
        );
    }

    #[tokio::test]
    async fn sync_unions_and_local_wins() -> TestResult {
        let ctx = TestContext::new().await;
        let stored = [
            ctx.line("lawn-suit", 5, red()).await?,
            ctx.line("hijab", 1, red()).await?,
        ];
        ctx.store_cart("amna", &stored).await?;

        ctx.carts.add_item("lawn-suit".into(), 1, red()).await?;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());

        let report = ctx.carts.sync_with_remote().await?;

        let products: Vec<(String, u32)> = report
            .items
            .iter()
            .map(|item| (item.product_id().to_string(), item.quantity().get()))
            .collect();

        assert_eq!(
            products,
            [
                ("lawn-suit".to_string(), 1),
                ("abaya".to_string(), 1),
                ("hijab".to_string(), 1)
            ]
        );
        assert_eq!(report.adopted, 1);
        assert_eq!(report.conflicts, 1);
        assert_eq!(ctx.stored_cart("amna").await?, ctx.carts.items().await);
        assert_eq!(ctx.local_cart().await, ctx.carts.items().await);

        Ok(())
    }

    #[tokio::test]
    async fn sync_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let stored = [ctx.line("hijab", 2, red()).await?];
        ctx.store_cart("amna", &stored).await?;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());

        let first = ctx.carts.sync_with_remote().await?;
        let second = ctx.carts.sync_with_remote().await?;

        assert_eq!(first.items, second.items);
        assert_eq!(second.adopted, 0);
        assert_eq!(ctx.stored_cart("amna").await?, second.items);

        Ok(())
    }

    #[tokio::test]
    async fn failed_sync_keeps_local_state() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());
        ctx.documents.set_offline(true);

        let result = ctx.carts.sync_with_remote().await;

        assert!(
            matches!(result, Err(CartsServiceError::SyncFailure(_))),
            "expected SyncFailure, got {result:?}"
        );
        assert_eq!(ctx.carts.items().await.len(), 1);
        assert!(ctx.carts.has_unsynced_changes().await);

        ctx.documents.set_offline(false);

        assert_eq!(
            ctx.carts.add_item("hijab".into(), 1, red()).await?,
            SyncStatus::Synced
        );
        assert_eq!(ctx.stored_cart("amna").await?.len(), 2);
        assert!(!ctx.carts.has_unsynced_changes().await);

        Ok(())
    }

    #[tokio::test]
    async fn mutation_while_offline_is_pending() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.identity.sign_in("amna".into());
        ctx.documents.set_offline(true);

        let status = ctx.carts.add_item("abaya".into(), 1, red()).await?;

        assert_eq!(status, SyncStatus::Pending);
        assert_eq!(ctx.carts.items().await.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_overwrites_stored_copy() -> TestResult {
        let ctx = TestContext::new().await;
        let stored = [ctx.line("hijab", 2, red()).await?];
        ctx.store_cart("amna", &stored).await?;
        ctx.identity.sign_in("amna".into());
        ctx.carts.sync_with_remote().await?;

        assert_eq!(ctx.carts.clear_cart().await, SyncStatus::Synced);
        assert!(ctx.carts.items().await.is_empty());
        assert!(ctx.stored_cart("amna").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_retries_once() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());
        ctx.carts.sync_with_remote().await?;
        ctx.documents.fail_next_writes(1);

        assert_eq!(ctx.carts.clear_cart().await, SyncStatus::Synced);
        assert!(ctx.stored_cart("amna").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_failing_twice_stays_dirty() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());
        ctx.carts.sync_with_remote().await?;
        ctx.documents.fail_next_writes(2);

        assert_eq!(ctx.carts.clear_cart().await, SyncStatus::Pending);
        assert!(ctx.carts.items().await.is_empty());
        assert!(ctx.carts.has_unsynced_changes().await);
        assert_eq!(ctx.stored_cart("amna").await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn sync_after_failed_clear_replaces_stored_cart() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());
        ctx.carts.sync_with_remote().await?;
        ctx.documents.fail_next_writes(2);

        assert_eq!(ctx.carts.clear_cart().await, SyncStatus::Pending);

        let report = ctx.carts.sync_with_remote().await?;

        assert!(report.items.is_empty());
        assert_eq!(report.adopted, 0);
        assert!(ctx.carts.items().await.is_empty());
        assert!(ctx.stored_cart("amna").await?.is_empty());
        assert!(!ctx.carts.has_unsynced_changes().await);

        Ok(())
    }

    #[tokio::test]
    async fn failed_clear_survives_sign_out_and_back_in() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 1, red()).await?;
        ctx.identity.sign_in("amna".into());
        ctx.carts.sync_with_remote().await?;
        ctx.documents.fail_next_writes(2);
        ctx.carts.clear_cart().await;

        ctx.identity.sign_out();
        ctx.carts.detach_remote().await;
        ctx.identity.sign_in("amna".into());

        assert_eq!(
            ctx.carts.add_item("hijab".into(), 1, red()).await?,
            SyncStatus::Synced
        );

        let stored: Vec<String> = ctx
            .stored_cart("amna")
            .await?
            .iter()
            .map(|item| item.product_id().to_string())
            .collect();

        assert_eq!(stored, ["hijab"]);
        assert_eq!(ctx.carts.items().await.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn overlapping_mutations_store_latest_list() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.identity.sign_in("amna".into());
        ctx.documents.set_write_delay_ms(5);

        let products = ["abaya", "hijab", "lawn-suit"];
        let mut tasks = Vec::new();

        for product in products {
            let carts = Arc::clone(&ctx.carts);

            tasks.push(tokio::spawn(async move {
                carts.add_item(product.into(), 1, SelectedAttributes::new()).await
            }));
        }

        for task in tasks {
            task.await??;
        }

        let local = ctx.carts.items().await;

        assert_eq!(local.len(), 3);
        assert_eq!(ctx.stored_cart("amna").await?, local);
        assert!(!ctx.carts.has_unsynced_changes().await);

        Ok(())
    }

    #[tokio::test]
    async fn restore_reads_device_copy() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.carts.add_item("abaya".into(), 2, red()).await?;

        let restarted = ctx.restart();
        restarted.carts.restore().await;

        assert_eq!(restarted.carts.items().await, ctx.carts.items().await);

        Ok(())
    }
}
