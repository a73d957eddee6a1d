//! Sync Models

/// What happened to the remote copy after a local mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// The mutation changed nothing.
    Unchanged,

    /// Nobody is signed in; the change is kept on the device only.
    LocalOnly,

    /// The remote copy holds the list as of this change or later.
    Synced,

    /// The remote write failed; the next sign-in, sync or mutation retries it.
    Pending,
}

/// Outcome of an explicit sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport<T> {
    /// The reconciled list, now held both locally and remotely
    pub items: Vec<T>,

    /// Entries taken over from the remote copy
    pub adopted: usize,

    /// Entries on both sides, resolved in favour of the local entry
    pub conflicts: usize,
}
