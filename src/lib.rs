//! Boutique
//!
//! Session cart and wishlist domain for a modest-fashion storefront: line items and their
//! identity keys, local-wins reconciliation with a stored copy, rupee pricing and catalog
//! listing filters.

pub mod attributes;
pub mod cart;
pub mod catalog;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod reconcile;
pub mod wishlist;
