//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    attributes::SelectedAttributes,
    items::{CartLineItem, ItemKey},
    pricing::{PricingError, total_price},
    products::{ProductId, ProductSnapshot, SnapshotError},
    reconcile::ItemList,
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A quantity below 1 was requested.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// No line exists at the given position.
    #[error("Item {0} not found")]
    ItemNotFound(usize),

    /// The product snapshot is not complete enough to be captured.
    #[error("invalid product snapshot")]
    InvalidSnapshot(#[from] SnapshotError),
}

/// Cart
///
/// Holds at most one line per identity key; adding an existing key increases that line's
/// quantity instead of appending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from raw lines, merging lines that share an identity key.
    ///
    /// The first line for a key keeps its position, price and snapshot; quantities of later
    /// duplicates are added to it.
    pub fn with_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            match cart.position(&item.key()) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.increase_quantity(item.quantity());
                    }
                }
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Add a product to the cart.
    ///
    /// Returns the position of the line holding the product.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::InvalidSnapshot`]: the snapshot lacks a name or image, or has a negative price.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        snapshot: &ProductSnapshot,
        quantity: u32,
        attributes_selected: SelectedAttributes,
    ) -> Result<usize, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity)?;

        snapshot.validate()?;

        let key = ItemKey {
            product_id,
            attributes: attributes_selected,
        };

        if let Some(index) = self.position(&key) {
            if let Some(existing) = self.items.get_mut(index) {
                existing.increase_quantity(quantity);
            }

            return Ok(index);
        }

        self.items.push(CartLineItem::new(
            key.product_id,
            snapshot,
            quantity,
            key.attributes,
        ));

        Ok(self.items.len() - 1)
    }

    /// Replace the quantity of the line at `index`.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero; the line is left unchanged.
    /// - [`CartError::ItemNotFound`]: there is no line at `index`.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity)?;

        self.items
            .get_mut(index)
            .ok_or(CartError::ItemNotFound(index))?
            .set_quantity(quantity);

        Ok(())
    }

    /// Remove the line at `index`. Out of range positions are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<CartLineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Take ordered lines out of the cart.
    ///
    /// Each line loses the ordered quantity of the line with the same identity key; lines left
    /// with nothing are removed. Units added after the order was taken stay in the cart.
    ///
    /// Returns whether anything changed.
    pub fn remove_ordered(&mut self, ordered: &[CartLineItem]) -> bool {
        let mut changed = false;

        for line in ordered {
            let Some(index) = self.position(&line.key()) else {
                continue;
            };

            let remaining = self
                .items
                .get(index)
                .and_then(|item| item.quantity().get().checked_sub(line.quantity().get()))
                .and_then(NonZeroU32::new);

            match remaining {
                Some(quantity) => {
                    if let Some(item) = self.items.get_mut(index) {
                        item.set_quantity(quantity);
                    }
                }
                None => {
                    self.items.remove(index);
                }
            }

            changed = true;
        }

        changed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if there is no line at `index`.
    pub fn get_item(&self, index: usize) -> Result<&CartLineItem, CartError> {
        self.items.get(index).ok_or(CartError::ItemNotFound(index))
    }

    /// Position of the line with the given identity key.
    pub fn position(&self, key: &ItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.has_key(key))
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Calculate the subtotal of the cart from the captured prices.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if an amount overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        total_price(&self.items)
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }
}

impl ItemList for Cart {
    type Item = CartLineItem;

    fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    fn from_items(items: Vec<CartLineItem>) -> Self {
        Self::with_items(items)
    }
}
