//! The transaction collection store and its subscription contract.
//!
//! The store is the application's external collaborator: it owns durability
//! and realtime fan-out, and the rest of the app only sees this module's
//! trait. Subscribers receive the owner's *full* record set on every change,
//! never a diff, and replace their previous snapshot wholesale.

mod sqlite;

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction, TransactionId},
    user::UserID,
};

pub use sqlite::SqliteTransactionStore;

/// The full set of one owner's transactions at a point in time.
///
/// Shared behind an [Arc] because every live subscriber of the same owner
/// holds the same snapshot.
pub type Snapshot = Arc<Vec<Transaction>>;

/// Handles the creation, deletion, and live observation of transactions.
///
/// Ordering note: a snapshot reflecting a locally issued write may arrive
/// after the write call has already returned. Callers must tolerate a brief
/// window where, e.g., a just-deleted transaction is still visible.
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Open a live subscription to `owner`'s transactions.
    ///
    /// The returned receiver immediately holds the current snapshot and is
    /// updated on every matching create or delete, by any client, until it
    /// is dropped. Dropping the receiver releases the subscription.
    ///
    /// # Errors
    /// Returns [Error::RemoteSubscription] if the snapshot stream cannot be
    /// established.
    fn subscribe(&self, owner: UserID) -> Result<SnapshotReceiver, Error>;

    /// Create a new transaction in the store.
    ///
    /// # Errors
    /// Returns [Error::RemoteWrite] if the store rejects the write. Nothing
    /// is applied locally on failure, so there is nothing to roll back.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Delete a transaction from the store by its ID.
    ///
    /// Deleting an ID that does not exist is treated as success; no
    /// existence check is required before calling.
    ///
    /// # Errors
    /// Returns [Error::RemoteWrite] if the store rejects the delete.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;
}

/// A live, cancellable stream of snapshots for one owner.
///
/// Dropping the receiver unsubscribes. The receiver is independent of the
/// session that created it only in the sense that it keeps the *owner*
/// fixed; a new session identity means calling
/// [TransactionStore::subscribe] again rather than reusing an old receiver.
#[derive(Debug, Clone)]
pub struct SnapshotReceiver {
    inner: watch::Receiver<Snapshot>,
}

impl SnapshotReceiver {
    pub(crate) fn new(inner: watch::Receiver<Snapshot>) -> Self {
        Self { inner }
    }

    /// The snapshot as of the most recent change.
    pub fn current(&self) -> Snapshot {
        self.inner.borrow().clone()
    }

    /// Wait for the next snapshot and return it.
    ///
    /// # Errors
    /// Returns [Error::RemoteSubscription] if the publisher side has gone
    /// away; the caller should surface a persistent disconnected indicator
    /// rather than silently keeping the last-known snapshot.
    pub async fn changed(&mut self) -> Result<Snapshot, Error> {
        self.inner
            .changed()
            .await
            .map_err(|_| Error::RemoteSubscription("the snapshot publisher was dropped".into()))?;

        Ok(self.current())
    }
}
