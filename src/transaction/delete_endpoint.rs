//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{AppState, store::TransactionStore, transaction::TransactionId};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState<S>
where
    S: TransactionStore,
{
    /// The store holding the transaction collection.
    pub transaction_store: S,
}

impl<S> FromRef<AppState<S>> for DeleteTransactionState<S>
where
    S: TransactionStore,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for deleting a transaction by its ID.
///
/// Responds with an empty 200 on success. The deleted row may stay visible
/// until the next snapshot reaches the dashboard; that window is expected,
/// not a bug. Deleting an ID that no longer exists also counts as success,
/// since another client may have deleted it first.
///
/// A store failure is reported as a non-fatal alert and never retried.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<DeleteTransactionState<S>>,
    Path(transaction_id): Path<TransactionId>,
) -> Response
where
    S: TransactionStore,
{
    match state.transaction_store.delete(transaction_id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");

            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        PasswordHash,
        category::{Category, TransactionKind},
        db::initialize,
        store::{SqliteTransactionStore, TransactionStore},
        transaction::NewTransaction,
        user::{UserID, create_user},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_state() -> (DeleteTransactionState<SqliteTransactionStore>, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "test@example.com",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();

        let store = SqliteTransactionStore::new(Arc::new(Mutex::new(connection)));

        (
            DeleteTransactionState {
                transaction_store: store,
            },
            user.id,
        )
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let (state, owner) = get_test_state();
        let transaction = state
            .transaction_store
            .create(NewTransaction {
                owner,
                description: "coffee".to_owned(),
                amount: 4.5,
                kind: TransactionKind::Expense,
                category: Category::new_unchecked("Food"),
                created_at: datetime!(2025-10-05 12:00 UTC),
            })
            .unwrap();

        let response =
            delete_transaction_endpoint(State(state.clone()), Path(transaction.id))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = state.transaction_store.subscribe(owner).unwrap().current();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_success() {
        let (state, _owner) = get_test_state();

        let response = delete_transaction_endpoint(State(state), Path(9999))
            .await
            .into_response();

        // Another client may have deleted the record already, so a missing
        // ID is not an error.
        assert_eq!(response.status(), StatusCode::OK);
    }
}
