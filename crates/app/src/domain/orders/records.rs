//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    orders::models::{CheckoutDetails, Order},
    remote::records::CartItemRecord,
};

/// Collection holding placed orders, keyed by order id
pub(crate) const ORDERS_COLLECTION: &str = "orders";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRecord<'a> {
    id: String,
    user_id: &'a str,
    details: &'a CheckoutDetails,
    items: Vec<CartItemRecord>,
    subtotal: Decimal,
    shipping_fee: Decimal,
    total: Decimal,
    placed_at: Timestamp,
}

impl<'a> From<&'a Order> for OrderRecord<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            id: order.uuid.to_string(),
            user_id: order.user.as_str(),
            details: &order.details,
            items: order.lines.iter().map(CartItemRecord::from).collect(),
            subtotal: order.subtotal,
            shipping_fee: order.shipping_fee,
            total: order.total,
            placed_at: order.placed_at,
        }
    }
}
