//! Orders service errors.

use boutique::pricing::PricingError;
use thiserror::Error;

use crate::domain::remote::RemoteStoreError;

/// Problems with the contact and shipping details of an order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutDetailsError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("email address is invalid")]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid checkout details")]
    InvalidDetails(#[from] CheckoutDetailsError),

    #[error("order total could not be calculated")]
    Pricing(#[from] PricingError),

    #[error("order could not be submitted")]
    Submit(#[source] RemoteStoreError),
}
