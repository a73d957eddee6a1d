//! Remote store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteStoreError {
    #[error("document store error: {0}")]
    Backend(String),

    #[error("malformed document")]
    Malformed(#[source] serde_json::Error),
}

impl From<serde_json::Error> for RemoteStoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error)
    }
}
