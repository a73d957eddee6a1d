//! Catalog listings
//!
//! Filtering and sorting of an already loaded product list, as used by category pages.

use std::{cmp::Ordering, collections::BTreeMap, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    attributes::SelectedAttributes,
    products::{Images, ProductDisplay, ProductId, ProductSnapshot},
};

/// A product as shown on a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    /// Product reference
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category the product is listed under
    pub category: String,

    /// Image references, primary image first
    #[serde(default)]
    pub images: Images,

    /// URL slug of the product page
    #[serde(default)]
    pub slug: Option<String>,

    /// Current price
    pub price: Decimal,

    /// Price before a markdown, when the product is on sale
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,

    /// Attribute values on offer, e.g. `Size → [S, M, L]`
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Position among featured products; lower comes first
    #[serde(default)]
    pub featured_rank: Option<u32>,

    /// When the product was listed
    pub created_at: Timestamp,
}

impl ProductListing {
    /// The snapshot captured when the product is added to a cart or wishlist.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot::new(
            ProductDisplay {
                name: self.name.clone(),
                images: self.images.clone(),
                slug: self.slug.clone(),
            },
            self.price,
        )
    }

    /// Whether at least one unit is in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether the product is marked down from a higher price.
    pub fn on_sale(&self) -> bool {
        self.compare_at_price
            .is_some_and(|compare_at| compare_at > self.price)
    }

    /// Whether the product offers `value` for the attribute `name`.
    pub fn offers(&self, name: &str, value: &str) -> bool {
        self.attributes.get(name).is_some_and(|values| {
            values
                .iter()
                .any(|offered| offered.eq_ignore_ascii_case(value))
        })
    }
}

/// Listing filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Category, compared case-insensitively
    pub category: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    pub max_price: Option<Decimal>,

    /// Attribute values the product must offer
    pub attributes: SelectedAttributes,

    /// Only products with stock
    pub in_stock_only: bool,

    /// Only marked-down products
    pub on_sale_only: bool,

    /// Case-insensitive substring of the name
    pub search: Option<String>,
}

impl ProductFilter {
    /// Whether a listing passes every set criterion.
    pub fn matches(&self, listing: &ProductListing) -> bool {
        if let Some(category) = &self.category
            && !listing.category.eq_ignore_ascii_case(category)
        {
            return false;
        }

        if self.min_price.is_some_and(|min| listing.price < min)
            || self.max_price.is_some_and(|max| listing.price > max)
        {
            return false;
        }

        if self.in_stock_only && !listing.in_stock() {
            return false;
        }

        if self.on_sale_only && !listing.on_sale() {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();

            if !needle.is_empty() && !listing.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        self.attributes
            .iter()
            .all(|(name, value)| listing.offers(name, value))
    }
}

/// Errors raised when parsing a sort order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortOrderError {
    /// The value names no known sort order.
    #[error("unknown sort order: {0}")]
    Unknown(String),
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Featured products by rank, then the rest in input order.
    #[default]
    Featured,

    /// Cheapest first.
    PriceLowToHigh,

    /// Most expensive first.
    PriceHighToLow,

    /// Most recently listed first.
    Newest,

    /// Alphabetical by name, ignoring case.
    NameAscending,
}

impl SortOrder {
    fn compare(self, a: &ProductListing, b: &ProductListing) -> Ordering {
        match self {
            SortOrder::Featured => match (a.featured_rank, b.featured_rank) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortOrder::PriceLowToHigh => a.price.cmp(&b.price),
            SortOrder::PriceHighToLow => b.price.cmp(&a.price),
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::NameAscending => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "featured" => Ok(SortOrder::Featured),
            "price-asc" => Ok(SortOrder::PriceLowToHigh),
            "price-desc" => Ok(SortOrder::PriceHighToLow),
            "newest" => Ok(SortOrder::Newest),
            "name" => Ok(SortOrder::NameAscending),
            other => Err(SortOrderError::Unknown(other.to_string())),
        }
    }
}

/// Applies `filter`, then sorts by `order`. Equal listings keep their input order.
pub fn filter_and_sort<'a>(
    listings: &'a [ProductListing],
    filter: &ProductFilter,
    order: SortOrder,
) -> Vec<&'a ProductListing> {
    let mut matched: Vec<&ProductListing> = listings
        .iter()
        .filter(|listing| filter.matches(listing))
        .collect();

    matched.sort_by(|a, b| order.compare(a, b));

    matched
}
