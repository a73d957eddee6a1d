//! Boutique prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    attributes::SelectedAttributes,
    cart::{Cart, CartError},
    catalog::{ProductFilter, ProductListing, SortOrder, SortOrderError, filter_and_sort},
    items::{CartLineItem, ItemKey, WishlistItem},
    pricing::{PricingError, format_currency, total_price},
    products::{ProductDisplay, ProductId, ProductSnapshot, SnapshotError},
    reconcile::{ItemList, Keyed, Reconciled, reconcile},
    wishlist::Wishlist,
};
