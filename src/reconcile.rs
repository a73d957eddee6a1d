//! Reconciliation
//!
//! Merges a session's local list with the copy stored for the signed-in user. The local side
//! wins wholesale for entries present on both sides; entries only stored remotely are
//! adopted, entries only held locally are kept. Nothing is ever dropped.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Something with an identity key used to decide whether two entries are the same.
pub trait Keyed {
    /// Identity key type
    type Key: Eq + Hash + Clone;

    /// Returns the identity key.
    fn key(&self) -> Self::Key;
}

/// A list of keyed entries which keeps at most one entry per key.
pub trait ItemList: Default {
    /// Entry type
    type Item: Keyed + Clone;

    /// Entries in display order.
    fn items(&self) -> &[Self::Item];

    /// Builds the list from raw entries, coalescing duplicate keys.
    fn from_items(items: Vec<Self::Item>) -> Self;
}

/// Outcome of reconciling two lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    /// Merged entries: local entries in local order, then adopted remote entries in remote order
    pub items: Vec<T>,

    /// Number of entries adopted from the remote side
    pub adopted: usize,

    /// Number of keys present on both sides, resolved in favour of the local entry
    pub conflicts: usize,
}

/// Unions `local` and `remote` by identity key, keeping the local entry on conflict.
pub fn reconcile<T: Keyed + Clone>(local: &[T], remote: &[T]) -> Reconciled<T> {
    let mut seen: FxHashSet<T::Key> = FxHashSet::default();
    let mut items = Vec::with_capacity(local.len() + remote.len());

    for item in local {
        if seen.insert(item.key()) {
            items.push(item.clone());
        }
    }

    let local_len = items.len();
    let mut conflicts = 0;

    for item in remote {
        if seen.insert(item.key()) {
            items.push(item.clone());
        } else {
            conflicts += 1;
        }
    }

    Reconciled {
        adopted: items.len() - local_len,
        items,
        conflicts,
    }
}
