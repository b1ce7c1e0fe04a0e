//! Transaction records and the intake path that creates them.
//!
//! A transaction is immutable once created; the only operations are create
//! (via the intake validator) and delete. Everything else in the app derives
//! views from snapshots of the collection.

mod create_endpoint;
mod delete_endpoint;
mod form;
mod intake;
mod model;

pub use create_endpoint::{TransactionForm, create_transaction_endpoint, get_category_options};
pub use delete_endpoint::delete_transaction_endpoint;
pub use form::transaction_form;
pub use intake::{TransactionDraft, ValidationError, ValidationField, validate};
pub use model::{
    NewTransaction, Transaction, TransactionId, create_transaction_table, map_transaction_row,
};

#[cfg(test)]
pub(crate) use model::test_builder;
