//! Remote Store
//!
//! The signed-in customer's copy of the cart and wishlist, kept as one document per user in the
//! managed document store.

pub mod documents;
pub mod errors;
pub mod records;
pub mod service;

pub use documents::*;
pub use errors::RemoteStoreError;
pub use service::*;
