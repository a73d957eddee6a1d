//! Session services for the Boutique storefront.
//!
//! Holds the cart and wishlist of a browsing session, keeps them on the device, and reconciles
//! them with the signed-in customer's stored copy. The managed backend (documents, auth, images,
//! orders) is reached only through the collaborator traits in [`domain`].

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod session;
pub mod subscription;
pub mod users;

#[cfg(test)]
mod test;
