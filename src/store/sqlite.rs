//! The SQLite-backed transaction store.
//!
//! Implements [TransactionStore] over a shared database connection. A
//! `watch` channel per owner carries the realtime fan-out: after every
//! create or delete the store re-queries the owner's full record set and
//! publishes it to all live subscribers.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;
use tokio::sync::watch;

use crate::{
    Error,
    store::{Snapshot, SnapshotReceiver, TransactionStore},
    transaction::{NewTransaction, Transaction, TransactionId, map_transaction_row},
    user::UserID,
};

/// A [TransactionStore] backed by SQLite with per-owner snapshot fan-out.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
    publishers: Arc<Mutex<HashMap<UserID, watch::Sender<Snapshot>>>>,
}

impl SqliteTransactionStore {
    /// Create a store over an initialized database connection.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            connection,
            publishers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn query_snapshot(connection: &Connection, owner: UserID) -> Result<Vec<Transaction>, Error> {
        connection
            .prepare(
                "SELECT id, owner_id, description, amount, kind, category, created_at
                 FROM \"transaction\" WHERE owner_id = :owner_id ORDER BY id",
            )?
            .query_map(&[(":owner_id", &owner.as_i64())], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Push a fresh snapshot of `owner`'s records to their subscribers.
    ///
    /// A publish failure leaves subscribers one snapshot behind until the
    /// next write; it must not fail the write that triggered it, so errors
    /// are logged and swallowed here.
    fn publish(&self, connection: &Connection, owner: UserID) {
        let publishers = match self.publishers.lock() {
            Ok(publishers) => publishers,
            Err(error) => {
                tracing::error!("could not acquire the publisher lock: {error}");
                return;
            }
        };

        let Some(sender) = publishers.get(&owner) else {
            // Nobody has ever subscribed to this owner.
            return;
        };

        match Self::query_snapshot(connection, owner) {
            Ok(snapshot) => {
                sender.send_replace(Arc::new(snapshot));
            }
            Err(error) => {
                tracing::error!("could not build snapshot for owner {owner}: {error}");
            }
        }
    }
}

impl TransactionStore for SqliteTransactionStore {
    fn subscribe(&self, owner: UserID) -> Result<SnapshotReceiver, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::RemoteSubscription("could not acquire the store lock".into()))?;
        let mut publishers = self
            .publishers
            .lock()
            .map_err(|_| Error::RemoteSubscription("could not acquire the publisher lock".into()))?;

        let receiver = match publishers.get(&owner) {
            Some(sender) => sender.subscribe(),
            None => {
                let snapshot = Self::query_snapshot(&connection, owner)
                    .map_err(|error| Error::RemoteSubscription(error.to_string()))?;
                let (sender, receiver) = watch::channel(Arc::new(snapshot));
                publishers.insert(owner, sender);
                receiver
            }
        };

        Ok(SnapshotReceiver::new(receiver))
    }

    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (owner_id, description, amount, kind, category, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, owner_id, description, amount, kind, category, created_at",
            )
            .map_err(|error| Error::RemoteWrite(error.to_string()))?
            .query_row(
                (
                    new_transaction.owner.as_i64(),
                    &new_transaction.description,
                    new_transaction.amount,
                    new_transaction.kind,
                    new_transaction.category.as_str(),
                    new_transaction.created_at,
                ),
                map_transaction_row,
            )
            .map_err(|error| Error::RemoteWrite(error.to_string()))?;

        self.publish(&connection, transaction.owner);

        Ok(transaction)
    }

    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        // Look up the owner first so we know whose snapshot to refresh.
        let owner = match connection.query_row(
            "SELECT owner_id FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
            |row| row.get(0).map(UserID::new),
        ) {
            Ok(owner) => owner,
            // Deleting a transaction that does not exist is a success; the
            // record may simply have been deleted by another client already.
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(()),
            Err(error) => return Err(Error::RemoteWrite(error.to_string())),
        };

        connection
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
            .map_err(|error| Error::RemoteWrite(error.to_string()))?;

        self.publish(&connection, owner);

        Ok(())
    }
}
