//! Order Models

use boutique::items::CartLineItem;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{domain::orders::errors::CheckoutDetailsError, users::UserId};

/// Contact and shipping details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckoutDetails {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or [`CheckoutDetailsError::InvalidEmail`] when the
    /// email address has no `@` between a local part and a domain.
    pub fn validate(&self) -> Result<(), CheckoutDetailsError> {
        for (field, value) in [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutDetailsError::Missing(field));
            }
        }

        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(CheckoutDetailsError::InvalidEmail),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: Uuid,
    pub user: UserId,
    pub details: CheckoutDetails,

    /// Cart lines at the prices captured when they were added
    pub lines: Vec<CartLineItem>,

    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    pub placed_at: Timestamp,
}
