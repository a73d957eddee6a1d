//! Carts service errors.

use boutique::{cart::CartError, products::ProductId};
use thiserror::Error;

use crate::domain::{remote::RemoteStoreError, sync::SyncError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("no cart line at position {0}")]
    ItemNotFound(usize),

    #[error("product {0} could not be resolved")]
    SnapshotMissing(ProductId),

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("cart could not be synced")]
    SyncFailure(#[source] RemoteStoreError),
}

impl CartsServiceError {
    pub(crate) fn from_cart(error: CartError, product_id: &ProductId) -> Self {
        match error {
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::ItemNotFound(index) => Self::ItemNotFound(index),
            CartError::InvalidSnapshot(_) => Self::SnapshotMissing(product_id.clone()),
        }
    }
}

impl From<SyncError> for CartsServiceError {
    fn from(error: SyncError) -> Self {
        match error {
            SyncError::NotSignedIn => Self::NotSignedIn,
            SyncError::Remote(source) => Self::SyncFailure(source),
        }
    }
}
