//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    alert::AlertTemplate,
    auth::Session,
    category::TransactionKind,
    store::TransactionStore,
    transaction::{
        TransactionDraft,
        form::{category_options, transaction_form},
        intake::validate,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState<S>
where
    S: TransactionStore,
{
    /// The store holding the transaction collection.
    pub transaction_store: S,
}

impl<S> FromRef<AppState<S>> for CreateTransactionState<S>
where
    S: TransactionStore,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The form data for creating a transaction.
///
/// The amount arrives as raw text so that parse failures surface as intake
/// validation errors instead of form deserialization failures.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction in dollars, as entered.
    pub amount: String,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The chosen category.
    #[serde(default)]
    pub category: String,
}

/// A route handler for creating a new transaction.
///
/// The draft goes through the intake validator first; rejected drafts are
/// answered with a field-identified alert and never reach the store. On
/// success the response swaps in a fresh empty form; the transaction list
/// itself only updates when the store pushes the next snapshot.
///
/// A store failure is reported as a non-fatal alert and is not retried; the
/// user's entries stay in the form for manual resubmission.
pub async fn create_transaction_endpoint<S>(
    State(state): State<CreateTransactionState<S>>,
    Extension(session): Extension<Session>,
    Form(form): Form<TransactionForm>,
) -> Response
where
    S: TransactionStore,
{
    let draft = TransactionDraft {
        description: form.description,
        amount: form.amount,
        kind: form.kind,
        category: form.category,
    };

    // The owner comes from the session and the timestamp from the server
    // clock; nothing in the request can override either.
    let new_transaction = match validate(&draft, session.user_id, OffsetDateTime::now_utc()) {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            return Error::Validation(error).into_alert_response();
        }
    };

    match state.transaction_store.create(new_transaction) {
        Ok(transaction) => {
            tracing::info!(
                "created transaction {} for user {}",
                transaction.id,
                transaction.owner
            );

            let empty_form = TransactionDraft {
                kind: draft.kind,
                ..TransactionDraft::default()
            };

            let markup = html! {
                (transaction_form(&empty_form))
                (AlertTemplate::success("Transaction added", "").into_oob_html())
            };

            (StatusCode::OK, markup).into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");

            error.into_alert_response()
        }
    }
}

/// The query parameters for the category options fragment.
#[derive(Debug, Deserialize)]
pub struct CategoryOptionsParams {
    /// The kind whose category list to render.
    pub kind: TransactionKind,
}

/// A route handler serving the category `<option>` list for a kind.
///
/// The add-transaction form swaps these in when the user switches between
/// income and expense, mirroring how each kind has its own fixed list.
pub async fn get_category_options(Query(params): Query<CategoryOptionsParams>) -> Response {
    (StatusCode::OK, category_options(params.kind, "")).into_response()
}
