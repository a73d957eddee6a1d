//! Local store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("local storage I/O error")]
    Io(#[from] std::io::Error),

    #[error("local storage holds invalid data")]
    Json(#[from] serde_json::Error),
}
