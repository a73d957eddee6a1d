//! Collections
//!
//! Binds each session list to its slots in the local and remote stores.

use std::sync::Arc;

use async_trait::async_trait;
use boutique::{
    cart::Cart,
    items::{CartLineItem, WishlistItem},
    reconcile::{ItemList, Keyed},
    wishlist::Wishlist,
};

use crate::{
    domain::{
        local::{LocalStore, LocalStoreError},
        remote::{RemoteStore, RemoteStoreError},
    },
    users::UserId,
};

#[async_trait]
pub(crate) trait Collection: Send + Sync {
    type Item: Keyed + Clone + Send + Sync + 'static;
    type List: ItemList<Item = Self::Item> + Clone + Send + Sync + 'static;

    /// Name used in log events.
    const NAME: &'static str;

    async fn load_remote(&self, user: &UserId) -> Result<Vec<Self::Item>, RemoteStoreError>;

    async fn save_remote(&self, user: &UserId, items: &[Self::Item])
    -> Result<(), RemoteStoreError>;

    async fn load_local(&self) -> Result<Vec<Self::Item>, LocalStoreError>;

    async fn save_local(&self, items: &[Self::Item]) -> Result<(), LocalStoreError>;
}

pub(crate) struct CartCollection {
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStore>,
}

impl CartCollection {
    pub(crate) fn new(remote: Arc<dyn RemoteStore>, local: Arc<dyn LocalStore>) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl Collection for CartCollection {
    type Item = CartLineItem;
    type List = Cart;

    const NAME: &'static str = "cart";

    async fn load_remote(&self, user: &UserId) -> Result<Vec<CartLineItem>, RemoteStoreError> {
        self.remote.load_cart(user).await
    }

    async fn save_remote(
        &self,
        user: &UserId,
        items: &[CartLineItem],
    ) -> Result<(), RemoteStoreError> {
        self.remote.save_cart(user, items).await
    }

    async fn load_local(&self) -> Result<Vec<CartLineItem>, LocalStoreError> {
        self.local.load_cart().await
    }

    async fn save_local(&self, items: &[CartLineItem]) -> Result<(), LocalStoreError> {
        self.local.save_cart(items).await
    }
}

pub(crate) struct WishlistCollection {
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStore>,
}

impl WishlistCollection {
    pub(crate) fn new(remote: Arc<dyn RemoteStore>, local: Arc<dyn LocalStore>) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl Collection for WishlistCollection {
    type Item = WishlistItem;
    type List = Wishlist;

    const NAME: &'static str = "wishlist";

    async fn load_remote(&self, user: &UserId) -> Result<Vec<WishlistItem>, RemoteStoreError> {
        self.remote.load_wishlist(user).await
    }

    async fn save_remote(
        &self,
        user: &UserId,
        items: &[WishlistItem],
    ) -> Result<(), RemoteStoreError> {
        self.remote.save_wishlist(user, items).await
    }

    async fn load_local(&self) -> Result<Vec<WishlistItem>, LocalStoreError> {
        self.local.load_wishlist().await
    }

    async fn save_local(&self, items: &[WishlistItem]) -> Result<(), LocalStoreError> {
        self.local.save_wishlist(items).await
    }
}
