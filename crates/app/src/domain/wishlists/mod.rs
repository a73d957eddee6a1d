//! Wishlists

pub mod errors;
pub mod service;

pub use errors::WishlistsServiceError;
pub use service::*;
