//! Boutique Domain Concerns

pub mod carts;
pub mod catalog;
pub mod identity;
pub mod images;
pub mod local;
pub mod orders;
pub mod remote;
pub mod sync;
pub mod wishlists;
