//! Synced list

use std::sync::Arc;

use boutique::reconcile::{ItemList, reconcile};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    domain::{
        identity::IdentityService,
        remote::RemoteStoreError,
        sync::{
            collections::Collection,
            errors::SyncError,
            models::{SyncReport, SyncStatus},
        },
    },
    users::UserId,
};

/// How a remote write treats the stored copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Merge with the stored copy first if this user's list was not merged yet.
    Merge,

    /// Replace the stored copy without reading it, trying up to `attempts` times.
    Overwrite { attempts: u32 },
}

struct ListState<L> {
    list: L,

    /// Bumped on every change to `list`
    version: u64,

    /// Latest version known to be stored remotely for `merged_for`
    written: u64,

    /// User whose stored copy has been merged into `list`
    merged_for: Option<UserId>,

    /// User whose stored copy still has to be replaced by `list` after a failed overwrite.
    /// Kept across `detach`; while set, writes for that user replace instead of merging.
    overwrite_for: Option<UserId>,
}

/// A session list mirrored to the local store and, while signed in, the remote store.
///
/// The state lock is never held across a store call. Remote writes are serialized by a gate;
/// inside it the writer takes the latest list, so overlapping mutations end with the newest
/// list stored and writes of an already stored version are skipped.
pub(crate) struct SyncedList<C: Collection> {
    collection: C,
    identity: Arc<dyn IdentityService>,
    state: Mutex<ListState<C::List>>,
    remote_gate: Mutex<()>,
    local_gate: Mutex<u64>,
}

impl<C: Collection> SyncedList<C> {
    pub(crate) fn new(collection: C, identity: Arc<dyn IdentityService>) -> Self {
        Self {
            collection,
            identity,
            state: Mutex::new(ListState {
                list: C::List::default(),
                version: 0,
                written: 0,
                merged_for: None,
                overwrite_for: None,
            }),
            remote_gate: Mutex::new(()),
            local_gate: Mutex::new(0),
        }
    }

    pub(crate) async fn read<R>(&self, read: impl FnOnce(&C::List) -> R) -> R {
        read(&self.state.lock().await.list)
    }

    pub(crate) async fn items(&self) -> Vec<C::Item> {
        self.read(|list| list.items().to_vec()).await
    }

    /// Whether local changes have not reached the remote store yet.
    pub(crate) async fn is_dirty(&self) -> bool {
        let state = self.state.lock().await;

        state.written < state.version
    }

    /// Merge the copy saved on the device into the session list.
    pub(crate) async fn restore(&self) {
        let saved = match self.collection.load_local().await {
            Ok(saved) => saved,
            Err(error) => {
                warn!(list = C::NAME, ?error, "could not read saved list, starting empty");

                return;
            }
        };

        let mut state = self.state.lock().await;
        let merged = reconcile(state.list.items(), &saved);

        if merged.adopted > 0 {
            state.list = C::List::from_items(merged.items);
            state.version += 1;
        }

        debug!(list = C::NAME, restored = merged.adopted, "restored saved list");
    }

    /// Apply a change and persist it. `apply` reports whether anything changed.
    pub(crate) async fn mutate<E>(
        &self,
        apply: impl FnOnce(&mut C::List) -> Result<bool, E> + Send,
    ) -> Result<SyncStatus, E> {
        {
            let mut state = self.state.lock().await;

            if !apply(&mut state.list)? {
                return Ok(SyncStatus::Unchanged);
            }

            state.version += 1;
        }

        Ok(self.persist(WriteMode::Merge).await)
    }

    /// Apply a change and store the result remotely without merging, retrying a failed write.
    pub(crate) async fn overwrite(
        &self,
        apply: impl FnOnce(&mut C::List) + Send,
        attempts: u32,
    ) -> SyncStatus {
        {
            let mut state = self.state.lock().await;

            apply(&mut state.list);
            state.version += 1;
        }

        self.persist(WriteMode::Overwrite { attempts }).await
    }

    /// Merge with the signed-in user's stored copy and store the result on both sides.
    pub(crate) async fn sync_with_remote(&self) -> Result<SyncReport<C::Item>, SyncError> {
        let user = self
            .identity
            .current_user()
            .ok_or(SyncError::NotSignedIn)?;

        let _gate = self.remote_gate.lock().await;

        if self.overwrite_pending(&user).await {
            self.write_latest(&user, 1).await?;

            let items = self.items().await;

            debug!(list = C::NAME, user = %user, count = items.len(), "replaced stored list");

            return Ok(SyncReport {
                items,
                adopted: 0,
                conflicts: 0,
            });
        }

        Ok(self.merge_and_write(&user).await?)
    }

    /// Forget which user the list was merged for, e.g. after sign-out.
    pub(crate) async fn detach(&self) {
        let mut state = self.state.lock().await;

        state.merged_for = None;
        state.written = 0;
    }

    async fn persist(&self, mode: WriteMode) -> SyncStatus {
        self.save_local().await;

        let Some(user) = self.identity.current_user() else {
            return SyncStatus::LocalOnly;
        };

        match self.push(&user, mode).await {
            Ok(()) => SyncStatus::Synced,
            Err(error) => {
                warn!(list = C::NAME, user = %user, ?error, "remote write failed, keeping local changes");

                SyncStatus::Pending
            }
        }
    }

    async fn save_local(&self) {
        let mut saved = self.local_gate.lock().await;

        let (items, version) = {
            let state = self.state.lock().await;

            if state.version <= *saved {
                return;
            }

            (state.list.items().to_vec(), state.version)
        };

        match self.collection.save_local(&items).await {
            Ok(()) => *saved = version,
            Err(error) => warn!(list = C::NAME, ?error, "could not save list on device"),
        }
    }

    async fn push(&self, user: &UserId, mode: WriteMode) -> Result<(), RemoteStoreError> {
        let _gate = self.remote_gate.lock().await;

        let (merged, stored, overwrite) = {
            let state = self.state.lock().await;
            let merged = state.merged_for.as_ref() == Some(user);

            (
                merged,
                merged && state.written >= state.version,
                state.overwrite_for.as_ref() == Some(user),
            )
        };

        match mode {
            WriteMode::Merge if overwrite => self.write_latest(user, 1).await,
            WriteMode::Merge if !merged => self.merge_and_write(user).await.map(drop),
            _ if stored => Ok(()),
            WriteMode::Merge => self.write_latest(user, 1).await,
            WriteMode::Overwrite { attempts } => {
                let result = self.write_latest(user, attempts).await;

                if result.is_err() {
                    self.state.lock().await.overwrite_for = Some(user.clone());
                }

                result
            }
        }
    }

    async fn overwrite_pending(&self, user: &UserId) -> bool {
        self.state.lock().await.overwrite_for.as_ref() == Some(user)
    }

    async fn merge_and_write(
        &self,
        user: &UserId,
    ) -> Result<SyncReport<C::Item>, RemoteStoreError> {
        let remote = self.collection.load_remote(user).await?;

        let (report, version) = {
            let mut state = self.state.lock().await;
            let merged = reconcile(state.list.items(), &remote);

            if merged.adopted > 0 {
                state.list = C::List::from_items(merged.items.clone());
                state.version += 1;
            }

            let report = SyncReport {
                items: merged.items,
                adopted: merged.adopted,
                conflicts: merged.conflicts,
            };

            (report, state.version)
        };

        self.collection.save_remote(user, &report.items).await?;
        self.mark_written(user, version).await;
        self.save_local().await;

        debug!(
            list = C::NAME,
            user = %user,
            count = report.items.len(),
            adopted = report.adopted,
            conflicts = report.conflicts,
            "merged with stored list"
        );

        Ok(report)
    }

    async fn write_latest(&self, user: &UserId, attempts: u32) -> Result<(), RemoteStoreError> {
        let (items, version) = {
            let state = self.state.lock().await;

            (state.list.items().to_vec(), state.version)
        };

        let mut attempt = 1;

        loop {
            match self.collection.save_remote(user, &items).await {
                Ok(()) => {
                    self.mark_written(user, version).await;

                    debug!(list = C::NAME, user = %user, version, count = items.len(), "stored list");

                    return Ok(());
                }
                Err(error) if attempt < attempts => {
                    warn!(list = C::NAME, user = %user, attempt, ?error, "remote write failed, retrying");

                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn mark_written(&self, user: &UserId, version: u64) {
        let mut state = self.state.lock().await;

        state.written = state.written.max(version);
        state.merged_for = Some(user.clone());

        if state.overwrite_for.as_ref() == Some(user) {
            state.overwrite_for = None;
        }
    }
}
