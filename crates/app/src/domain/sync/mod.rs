//! Sync
//!
//! Keeps a session list on the device and, for a signed-in user, in the remote store. Local
//! state is authoritative: every remote write replaces the stored list with the full local one,
//! and the first write for a user is preceded by a merge with whatever that user already had.

mod collections;
pub mod errors;
mod list;
pub mod models;

pub(crate) use collections::{CartCollection, WishlistCollection};
pub use errors::SyncError;
pub(crate) use list::SyncedList;
pub use models::{SyncReport, SyncStatus};
