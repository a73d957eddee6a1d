//! Items

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    attributes::SelectedAttributes,
    products::{ProductDisplay, ProductId, ProductSnapshot},
    reconcile::Keyed,
};

/// Identity of a cart line: the product together with the attributes chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// Product reference
    pub product_id: ProductId,

    /// Attribute choices
    pub attributes: SelectedAttributes,
}

/// A cart line.
///
/// The price is captured when the line is created and cannot be changed afterwards, so a
/// session keeps the price the customer saw even when the catalog price moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    product_id: ProductId,
    product: ProductDisplay,
    quantity: NonZeroU32,
    #[serde(default)]
    attributes_selected: SelectedAttributes,
    price_at_add: Decimal,
}

impl CartLineItem {
    /// Creates a line from the catalog snapshot, capturing its current price.
    pub fn new(
        product_id: ProductId,
        snapshot: &ProductSnapshot,
        quantity: NonZeroU32,
        attributes_selected: SelectedAttributes,
    ) -> Self {
        Self {
            product_id,
            product: snapshot.display.clone(),
            quantity,
            attributes_selected,
            price_at_add: snapshot.price,
        }
    }

    /// Rebuilds a line from stored parts.
    pub fn from_parts(
        product_id: ProductId,
        product: ProductDisplay,
        quantity: NonZeroU32,
        attributes_selected: SelectedAttributes,
        price_at_add: Decimal,
    ) -> Self {
        Self {
            product_id,
            product,
            quantity,
            attributes_selected,
            price_at_add,
        }
    }

    /// Returns the identity key of the line.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            product_id: self.product_id.clone(),
            attributes: self.attributes_selected.clone(),
        }
    }

    /// Whether the line has the given identity key.
    pub fn has_key(&self, key: &ItemKey) -> bool {
        self.product_id == key.product_id && self.attributes_selected == key.attributes
    }

    /// Product reference
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Display fields captured at add-time
    pub fn product(&self) -> &ProductDisplay {
        &self.product
    }

    /// Quantity
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Attribute choices
    pub fn attributes_selected(&self) -> &SelectedAttributes {
        &self.attributes_selected
    }

    /// Unit price captured at add-time
    pub fn price_at_add(&self) -> Decimal {
        self.price_at_add
    }

    /// Replaces the quantity.
    pub fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Increases the quantity, saturating at `u32::MAX`.
    pub fn increase_quantity(&mut self, by: NonZeroU32) {
        self.quantity = self.quantity.saturating_add(by.get());
    }

    /// Unit price times quantity, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price_at_add
            .checked_mul(Decimal::from(self.quantity.get()))
    }
}

impl Keyed for CartLineItem {
    type Key = ItemKey;

    fn key(&self) -> ItemKey {
        CartLineItem::key(self)
    }
}

/// A wishlist entry. A product is either on the wishlist or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    product_id: ProductId,
    product: ProductDisplay,
}

impl WishlistItem {
    /// Creates an entry from a catalog snapshot.
    pub fn new(product_id: ProductId, snapshot: &ProductSnapshot) -> Self {
        Self::from_parts(product_id, snapshot.display.clone())
    }

    /// Rebuilds an entry from stored parts.
    pub fn from_parts(product_id: ProductId, product: ProductDisplay) -> Self {
        Self {
            product_id,
            product,
        }
    }

    /// Product reference
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Display fields captured at add-time
    pub fn product(&self) -> &ProductDisplay {
        &self.product
    }
}

impl Keyed for WishlistItem {
    type Key = ProductId;

    fn key(&self) -> ProductId {
        self.product_id.clone()
    }
}
