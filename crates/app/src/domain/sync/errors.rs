//! Sync errors.

use thiserror::Error;

use crate::domain::remote::RemoteStoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("remote store error")]
    Remote(#[from] RemoteStoreError),
}
