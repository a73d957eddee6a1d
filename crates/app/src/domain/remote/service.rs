//! Remote store service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use boutique::items::{CartLineItem, WishlistItem};
use jiff::Timestamp;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    domain::remote::{
        documents::DocumentStore,
        errors::RemoteStoreError,
        records::{
            CARTS_COLLECTION, CartItemRecord, ListDocument, RecordError, WISHLISTS_COLLECTION,
            WishlistItemRecord,
        },
    },
    users::UserId,
};

/// Remote store over the managed document store: one document per user and list.
#[derive(Clone)]
pub struct DocumentRemoteStore {
    documents: Arc<dyn DocumentStore>,
}

impl DocumentRemoteStore {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    async fn load<R, T>(&self, collection: &str, user: &UserId) -> Result<Vec<T>, RemoteStoreError>
    where
        R: DeserializeOwned,
        T: TryFrom<R, Error = RecordError>,
    {
        let Some(document) = self.documents.get_document(collection, user.as_str()).await? else {
            debug!(collection, user = %user, "no stored list");

            return Ok(Vec::new());
        };

        let document: ListDocument = serde_json::from_value(document)?;
        let total = document.items.len();

        let items: Vec<T> = document
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(position, value)| match parse_record::<R, T>(value) {
                Ok(item) => Some(item),
                Err(reason) => {
                    warn!(collection, user = %user, position, %reason, "skipping stored record");

                    None
                }
            })
            .collect();

        debug!(collection, user = %user, total, kept = items.len(), "loaded stored list");

        Ok(items)
    }

    async fn save<R: Serialize>(
        &self,
        collection: &str,
        user: &UserId,
        records: Vec<R>,
    ) -> Result<(), RemoteStoreError> {
        let items = records
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let count = items.len();

        let document = serde_json::to_value(ListDocument::new(items, Timestamp::now()))?;

        self.documents
            .set_document(collection, user.as_str(), document)
            .await?;

        debug!(collection, user = %user, count, "replaced stored list");

        Ok(())
    }
}

impl Debug for DocumentRemoteStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DocumentRemoteStore").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
enum InvalidRecord {
    #[error("unreadable record: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("invalid record: {0}")]
    Content(#[from] RecordError),
}

fn parse_record<R, T>(value: Value) -> Result<T, InvalidRecord>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    let record: R = serde_json::from_value(value)?;

    Ok(T::try_from(record)?)
}

#[async_trait]
impl RemoteStore for DocumentRemoteStore {
    async fn load_cart(&self, user: &UserId) -> Result<Vec<CartLineItem>, RemoteStoreError> {
        self.load::<CartItemRecord, CartLineItem>(CARTS_COLLECTION, user)
            .await
    }

    async fn save_cart(
        &self,
        user: &UserId,
        items: &[CartLineItem],
    ) -> Result<(), RemoteStoreError> {
        self.save(
            CARTS_COLLECTION,
            user,
            items.iter().map(CartItemRecord::from).collect(),
        )
        .await
    }

    async fn load_wishlist(&self, user: &UserId) -> Result<Vec<WishlistItem>, RemoteStoreError> {
        self.load::<WishlistItemRecord, WishlistItem>(WISHLISTS_COLLECTION, user)
            .await
    }

    async fn save_wishlist(
        &self,
        user: &UserId,
        items: &[WishlistItem],
    ) -> Result<(), RemoteStoreError> {
        self.save(
            WISHLISTS_COLLECTION,
            user,
            items.iter().map(WishlistItemRecord::from).collect(),
        )
        .await
    }
}

#[automock]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Load the user's stored cart. A user without a stored cart has an empty one.
    async fn load_cart(&self, user: &UserId) -> Result<Vec<CartLineItem>, RemoteStoreError>;

    /// Replace the user's stored cart with `items`.
    async fn save_cart(&self, user: &UserId, items: &[CartLineItem])
    -> Result<(), RemoteStoreError>;

    /// Load the user's stored wishlist.
    async fn load_wishlist(&self, user: &UserId) -> Result<Vec<WishlistItem>, RemoteStoreError>;

    /// Replace the user's stored wishlist with `items`.
    async fn save_wishlist(
        &self,
        user: &UserId,
        items: &[WishlistItem],
    ) -> Result<(), RemoteStoreError>;
}
