//! Wishlist

use crate::{
    items::WishlistItem,
    products::{ProductId, ProductSnapshot, SnapshotError},
    reconcile::{ItemList, Keyed},
};

/// Wishlist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wishlist from raw entries, keeping the first entry per product.
    pub fn with_items(items: impl IntoIterator<Item = WishlistItem>) -> Self {
        let mut wishlist = Self::new();

        for item in items {
            wishlist.insert(item);
        }

        wishlist
    }

    /// Add a product. Returns `false` when it was already present.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the snapshot lacks a name or image.
    pub fn add(
        &mut self,
        product_id: ProductId,
        snapshot: &ProductSnapshot,
    ) -> Result<bool, SnapshotError> {
        if self.contains(&product_id) {
            return Ok(false);
        }

        snapshot.display.validate()?;

        Ok(self.insert(WishlistItem::new(product_id, snapshot)))
    }

    /// Insert an entry unless its product is already present.
    pub fn insert(&mut self, item: WishlistItem) -> bool {
        if self.contains(item.product_id()) {
            return false;
        }

        self.items.push(item);

        true
    }

    /// Remove a product.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<WishlistItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)?;

        Some(self.items.remove(index))
    }

    /// Whether the product is on the wishlist.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.key() == product_id)
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &WishlistItem> {
        self.items.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consume the wishlist, returning its entries.
    pub fn into_items(self) -> Vec<WishlistItem> {
        self.items
    }
}

impl ItemList for Wishlist {
    type Item = WishlistItem;

    fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    fn from_items(items: Vec<WishlistItem>) -> Self {
        Self::with_items(items)
    }
}
