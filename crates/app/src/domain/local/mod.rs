//! Local Store
//!
//! The on-device copy of the cart and wishlist, so a guest session survives a restart.

pub mod errors;
pub mod service;

pub use errors::LocalStoreError;
pub use service::*;
