//! Image host errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageHostError {
    #[error("image not found")]
    NotFound,

    #[error("image host unavailable: {0}")]
    Unavailable(String),
}
