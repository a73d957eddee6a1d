//! Wishlists service errors.

use boutique::products::ProductId;
use thiserror::Error;

use crate::domain::{remote::RemoteStoreError, sync::SyncError};

#[derive(Debug, Error)]
pub enum WishlistsServiceError {
    #[error("product {0} could not be resolved")]
    SnapshotMissing(ProductId),

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("wishlist could not be synced")]
    SyncFailure(#[source] RemoteStoreError),
}

impl From<SyncError> for WishlistsServiceError {
    fn from(error: SyncError) -> Self {
        match error {
            SyncError::NotSignedIn => Self::NotSignedIn,
            SyncError::Remote(source) => Self::SyncFailure(source),
        }
    }
}
