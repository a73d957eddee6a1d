//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use boutique::pricing::{PricingError, to_decimal, to_money};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    carts::CartsService,
    identity::IdentityService,
    orders::{
        errors::OrdersServiceError,
        models::{CheckoutDetails, Order},
        repository::OrdersRepository,
    },
    sync::SyncStatus,
};

/// Places orders from the session cart.
pub struct CheckoutService {
    identity: Arc<dyn IdentityService>,
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersRepository>,
    shipping_fee: Decimal,
}

impl CheckoutService {
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityService>,
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersRepository>,
        shipping_fee: Decimal,
    ) -> Self {
        Self {
            identity,
            carts,
            orders,
            shipping_fee,
        }
    }
}

#[async_trait]
impl OrdersService for CheckoutService {
    async fn place_order(&self, details: CheckoutDetails) -> Result<Order, OrdersServiceError> {
        let user = self
            .identity
            .current_user()
            .ok_or(OrdersServiceError::NotSignedIn)?;

        details.validate()?;

        let cart = self.carts.cart().await;

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let subtotal = cart.subtotal()?;
        let subtotal_amount = to_decimal(&subtotal);
        let total = subtotal
            .add(to_money(self.shipping_fee)?)
            .map_err(PricingError::from)?;

        let order = Order {
            uuid: Uuid::now_v7(),
            user,
            details,
            subtotal: subtotal_amount,
            shipping_fee: self.shipping_fee,
            total: to_decimal(&total),
            lines: cart.into_items(),
            placed_at: Timestamp::now(),
        };

        self.orders
            .submit_order(&order)
            .await
            .map_err(OrdersServiceError::Submit)?;

        info!(order = %order.uuid, user = %order.user, total = %order.total, "placed order");

        if self.carts.remove_ordered(&order.lines).await == SyncStatus::Pending {
            warn!(order = %order.uuid, "ordered lines removed locally only");
        }

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for the current cart, then take the ordered lines out of the cart.
    async fn place_order(&self, details: CheckoutDetails) -> Result<Order, OrdersServiceError>;
}
