//! Local store service.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use boutique::items::{CartLineItem, WishlistItem};
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::domain::local::errors::LocalStoreError;

const CART_FILE: &str = "cart.json";
const WISHLIST_FILE: &str = "wishlist.json";

/// Local store keeping one JSON file per list in a state directory.
///
/// Files are replaced atomically by writing a sibling temporary file and renaming it over the
/// previous copy.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, LocalStoreError> {
        let path = self.dir.join(file);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved list");

                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write<T: Serialize + Sync>(
        &self,
        file: &str,
        items: &[T],
    ) -> Result<(), LocalStoreError> {
        let bytes = serde_json::to_vec_pretty(items)?;

        fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(file);
        let staging = staging_path(&path);

        fs::write(&staging, bytes).await?;
        fs::rename(&staging, &path).await?;

        debug!(path = %path.display(), count = items.len(), "saved list");

        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");

    PathBuf::from(staging)
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn load_cart(&self) -> Result<Vec<CartLineItem>, LocalStoreError> {
        self.read(CART_FILE).await
    }

    async fn save_cart(&self, items: &[CartLineItem]) -> Result<(), LocalStoreError> {
        self.write(CART_FILE, items).await
    }

    async fn load_wishlist(&self) -> Result<Vec<WishlistItem>, LocalStoreError> {
        self.read(WISHLIST_FILE).await
    }

    async fn save_wishlist(&self, items: &[WishlistItem]) -> Result<(), LocalStoreError> {
        self.write(WISHLIST_FILE, items).await
    }
}

/// Local store held in memory, for sessions without a state directory.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    cart: RwLock<Vec<CartLineItem>>,
    wishlist: RwLock<Vec<WishlistItem>>,
}

impl MemoryLocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStore for MemoryLocalStore {
    async fn load_cart(&self) -> Result<Vec<CartLineItem>, LocalStoreError> {
        Ok(self.cart.read().await.clone())
    }

    async fn save_cart(&self, items: &[CartLineItem]) -> Result<(), LocalStoreError> {
        items.clone_into(&mut *self.cart.write().await);

        Ok(())
    }

    async fn load_wishlist(&self) -> Result<Vec<WishlistItem>, LocalStoreError> {
        Ok(self.wishlist.read().await.clone())
    }

    async fn save_wishlist(&self, items: &[WishlistItem]) -> Result<(), LocalStoreError> {
        items.clone_into(&mut *self.wishlist.write().await);

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Load the saved cart. Nothing saved yet is an empty cart.
    async fn load_cart(&self) -> Result<Vec<CartLineItem>, LocalStoreError>;

    /// Replace the saved cart.
    async fn save_cart(&self, items: &[CartLineItem]) -> Result<(), LocalStoreError>;

    /// Load the saved wishlist.
    async fn load_wishlist(&self) -> Result<Vec<WishlistItem>, LocalStoreError>;

    /// Replace the saved wishlist.
    async fn save_wishlist(&self, items: &[WishlistItem]) -> Result<(), LocalStoreError>;
}
