//! The server-sent event stream that keeps the dashboard live.
//!
//! Each connection holds one snapshot subscription for the signed-in owner.
//! Every time the store publishes a new snapshot, the whole dashboard
//! fragment is re-derived and pushed to the browser, which swaps it in.
//! Closing the page drops the stream and with it the subscription; a new
//! session identity gets a new subscription via a fresh connection.

use std::convert::Infallible;

use axum::{
    Extension,
    extract::{Query, State},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};

use crate::{
    Error,
    auth::Session,
    dashboard::{
        page::{DashboardState, dashboard_content},
        view_model::{DashboardViewModel, ViewState},
    },
    store::TransactionStore,
    timezone::get_local_offset,
};

/// A route handler streaming dashboard fragments as server-sent events.
///
/// The first event carries the current snapshot immediately; subsequent
/// events follow the store's publishes. If the snapshot stream fails, the
/// SSE connection is closed so the client's reconnect logic (and the
/// page's disconnected warning) takes over rather than freezing silently.
pub async fn get_dashboard_events<S>(
    State(state): State<DashboardState<S>>,
    Extension(session): Extension<Session>,
    Query(view): Query<ViewState>,
) -> Response
where
    S: TransactionStore,
{
    let Some(offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let mut receiver = match state.transaction_store.subscribe(session.user_id) {
        Ok(receiver) => receiver,
        Err(error) => {
            tracing::error!("could not subscribe to transactions: {error}");
            return error.into_response();
        }
    };

    let stream = async_stream::stream! {
        loop {
            let snapshot = receiver.current();
            let view_model = DashboardViewModel::build(&snapshot, view, offset);
            let markup = dashboard_content(&view_model);

            yield Ok::<Event, Infallible>(
                Event::default().event("snapshot").data(markup.into_string()),
            );

            if let Err(error) = receiver.changed().await {
                tracing::error!("dashboard snapshot stream ended: {error}");
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
}

#[cfg(test)]
mod dashboard_events_tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Extension,
        extract::{Query, State},
        response::Response,
    };
    use rusqlite::Connection;
    use time::macros::datetime;
    use tokio_stream::StreamExt;

    use crate::{
        PasswordHash,
        auth::Session,
        category::{Category, TransactionKind},
        dashboard::{page::DashboardState, view_model::ViewState},
        db::initialize,
        store::{SqliteTransactionStore, TransactionStore},
        transaction::NewTransaction,
        user::create_user,
    };

    use super::get_dashboard_events;

    fn get_test_parts() -> (DashboardState<SqliteTransactionStore>, Session) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();

        let store = SqliteTransactionStore::new(Arc::new(Mutex::new(connection)));

        (
            DashboardState {
                transaction_store: store,
                local_timezone: "Etc/UTC".to_owned(),
            },
            Session {
                user_id: user.id,
                email: user.email,
            },
        )
    }

    fn new_transaction(session: &Session, description: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            owner: session.user_id,
            description: description.to_owned(),
            amount,
            kind: TransactionKind::Income,
            category: Category::new_unchecked("Salary"),
            created_at: datetime!(2025-10-01 09:00 UTC),
        }
    }

    async fn first_frame(response: Response) -> String {
        // The SSE body never ends, so read one frame at a time instead of
        // collecting the body.
        let mut stream = response.into_body().into_data_stream();

        let chunk = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("timed out waiting for an SSE frame")
            .expect("stream ended unexpectedly")
            .expect("stream produced an error");

        String::from_utf8(chunk.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn first_event_carries_the_current_snapshot() {
        let (state, session) = get_test_parts();
        state
            .transaction_store
            .create(new_transaction(&session, "Salary for March", 100.0))
            .unwrap();

        let response = get_dashboard_events(
            State(state),
            Extension(session),
            Query(ViewState::default()),
        )
        .await;

        assert!(response.status().is_success());
        let frame = first_frame(response).await;
        assert!(frame.contains("event: snapshot"));
        assert!(frame.contains("Salary for March"));
        assert!(frame.contains("$100.00"));
    }

    #[tokio::test]
    async fn a_write_pushes_a_fresh_fragment() {
        let (state, session) = get_test_parts();
        let store = state.transaction_store.clone();

        let response = get_dashboard_events(
            State(state),
            Extension(session.clone()),
            Query(ViewState::default()),
        )
        .await;

        let mut stream = response.into_body().into_data_stream();

        // Consume the initial snapshot frame.
        let first = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(String::from_utf8(first.to_vec()).unwrap().contains("No transactions yet."));

        store
            .create(new_transaction(&session, "Salary for March", 100.0))
            .unwrap();

        let second = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("timed out waiting for the snapshot push")
            .unwrap()
            .unwrap();
        let frame = String::from_utf8(second.to_vec()).unwrap();
        assert!(frame.contains("Salary for March"));
    }
}
