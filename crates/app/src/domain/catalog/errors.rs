//! Catalog service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product not found")]
    NotFound,

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
