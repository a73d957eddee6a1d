//! Remote Records
//!
//! Wire shapes of the per-user list documents. Records are validated one by one when read so a
//! single bad entry written by another client does not take the whole list down.

use std::{collections::BTreeMap, num::NonZeroU32};

use boutique::{
    attributes::SelectedAttributes,
    items::{CartLineItem, WishlistItem},
    products::{ProductDisplay, ProductId, SnapshotError},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Collection holding one cart document per user
pub const CARTS_COLLECTION: &str = "carts";

/// Collection holding one wishlist document per user
pub const WISHLISTS_COLLECTION: &str = "wishlists";

/// Reasons a stored record is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has no product id")]
    MissingProductId,

    #[error("record quantity {0} is below 1")]
    InvalidQuantity(i64),

    #[error("record has a negative price")]
    NegativePrice,

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// A per-user list document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocument {
    /// Raw entries; each is validated separately
    pub items: Vec<Value>,

    /// When the document was last replaced
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl ListDocument {
    /// Builds a document from already serialized entries.
    pub fn new(items: Vec<Value>, updated_at: Timestamp) -> Self {
        Self {
            items,
            updated_at: Some(updated_at),
        }
    }
}

/// Product display fields as stored alongside an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl From<&ProductDisplay> for ProductRecord {
    fn from(display: &ProductDisplay) -> Self {
        Self {
            name: display.name.clone(),
            images: display.images.to_vec(),
            slug: display.slug.clone(),
        }
    }
}

impl TryFrom<ProductRecord> for ProductDisplay {
    type Error = SnapshotError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let display = ProductDisplay {
            name: record.name,
            images: record.images.into_iter().collect(),
            slug: record.slug,
        };

        display.validate()?;

        Ok(display)
    }
}

/// Cart line as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRecord {
    pub product_id: String,
    pub product: ProductRecord,
    pub quantity: i64,
    #[serde(default)]
    pub attributes_selected: BTreeMap<String, String>,
    pub price_at_add: Decimal,
}

impl From<&CartLineItem> for CartItemRecord {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id().to_string(),
            product: ProductRecord::from(item.product()),
            quantity: i64::from(item.quantity().get()),
            attributes_selected: item
                .attributes_selected()
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            price_at_add: item.price_at_add(),
        }
    }
}

impl TryFrom<CartItemRecord> for CartLineItem {
    type Error = RecordError;

    fn try_from(record: CartItemRecord) -> Result<Self, Self::Error> {
        let product_id = ProductId::from(record.product_id);

        if product_id.is_blank() {
            return Err(RecordError::MissingProductId);
        }

        let quantity = u32::try_from(record.quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(RecordError::InvalidQuantity(record.quantity))?;

        if record.price_at_add.is_sign_negative() && !record.price_at_add.is_zero() {
            return Err(RecordError::NegativePrice);
        }

        Ok(CartLineItem::from_parts(
            product_id,
            ProductDisplay::try_from(record.product)?,
            quantity,
            record
                .attributes_selected
                .into_iter()
                .collect::<SelectedAttributes>(),
            record.price_at_add,
        ))
    }
}

/// Wishlist entry as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemRecord {
    pub product_id: String,
    pub product: ProductRecord,
}

impl From<&WishlistItem> for WishlistItemRecord {
    fn from(item: &WishlistItem) -> Self {
        Self {
            product_id: item.product_id().to_string(),
            product: ProductRecord::from(item.product()),
        }
    }
}

impl TryFrom<WishlistItemRecord> for WishlistItem {
    type Error = RecordError;

    fn try_from(record: WishlistItemRecord) -> Result<Self, Self::Error> {
        let product_id = ProductId::from(record.product_id);

        if product_id.is_blank() {
            return Err(RecordError::MissingProductId);
        }

        Ok(WishlistItem::from_parts(
            product_id,
            ProductDisplay::try_from(record.product)?,
        ))
    }
}
