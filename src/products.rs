//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Image references for a product. Most products carry between one and four.
pub type Images = SmallVec<[String; 4]>;

/// Errors raised when a product snapshot is not complete enough to be captured.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The snapshot has no display name.
    #[error("product snapshot has no display name")]
    MissingName,

    /// The snapshot has no image reference.
    #[error("product snapshot has no image reference")]
    MissingImage,

    /// The snapshot carries a price below zero.
    #[error("product snapshot has a negative price")]
    NegativePrice,
}

/// Product identifier, as issued by the backend document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Display fields of a product, copied onto cart and wishlist entries when they are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDisplay {
    /// Product name
    pub name: String,

    /// Image references, primary image first
    #[serde(default)]
    pub images: Images,

    /// URL slug of the product page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl ProductDisplay {
    /// Creates display fields with a single image and no slug.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        let mut images = Images::new();
        images.push(image.into());

        Self {
            name: name.into(),
            images,
            slug: None,
        }
    }

    /// Sets the slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Returns the primary image reference.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Checks that the display fields are complete enough to render a line item.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::MissingName`]: the name is blank.
    /// - [`SnapshotError::MissingImage`]: no non-blank image reference is present.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.name.trim().is_empty() {
            return Err(SnapshotError::MissingName);
        }

        if !self.images.iter().any(|image| !image.trim().is_empty()) {
            return Err(SnapshotError::MissingImage);
        }

        Ok(())
    }
}

/// A product as the catalog currently lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Display fields
    #[serde(flatten)]
    pub display: ProductDisplay,

    /// Current catalog price
    pub price: Decimal,
}

impl ProductSnapshot {
    /// Creates a snapshot from display fields and the current price.
    pub fn new(display: ProductDisplay, price: Decimal) -> Self {
        Self { display, price }
    }

    /// Checks the display fields and price.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] describing the first missing or invalid field.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.display.validate()?;

        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(SnapshotError::NegativePrice);
        }

        Ok(())
    }
}
