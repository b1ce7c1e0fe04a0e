//! Defines the core transaction record and its database schema.

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    category::{Category, TransactionKind},
    user::UserID,
};

/// The identifier the store assigns to a transaction on creation.
pub type TransactionId = i64;

/// An income or expense record owned by a single user.
///
/// `amount` is a non-negative magnitude; direction is carried solely by
/// `kind`. Records are immutable after creation, so there is no update path
/// anywhere in this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID the store assigned when the record was created.
    pub id: TransactionId,
    /// The user who owns the record. Set once at creation, never changed.
    pub owner: UserID,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The magnitude of money spent or earned. Always non-negative.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category the transaction belongs to, from the fixed list for `kind`.
    pub category: Category,
    /// When the record was created, stamped by the intake path.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// The amount, with non-finite values coerced to zero.
    ///
    /// Aggregation must be total over any snapshot the store hands us, so a
    /// record whose amount failed to round-trip cleanly counts as zero
    /// rather than poisoning every total with a NaN.
    pub fn amount_or_zero(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }
}

/// The normalized payload produced by the intake validator.
///
/// Only [crate::transaction::validate] constructs these, so holding a
/// `NewTransaction` means the description, amount, and category have already
/// passed validation and the owner and timestamp were stamped server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The owner stamped from the authenticated session.
    pub owner: UserID,
    /// The trimmed description.
    pub description: String,
    /// The parsed, non-negative amount.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The validated category.
    pub category: Category,
    /// The creation time stamped at intake.
    pub created_at: OffsetDateTime,
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|raw| TransactionKind::parse(raw).ok_or(FromSqlError::InvalidType))
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(owner_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Add index used by the per-owner snapshot query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_owner ON \"transaction\"(owner_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns id, owner_id, description, amount, kind, category,
/// created_at in that order. A `created_at` value that cannot be parsed
/// degrades to the current time instead of failing the whole snapshot.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let owner = UserID::new(row.get(1)?);
    let description = row.get(2)?;
    let amount = row.get(3)?;
    let kind = row.get(4)?;
    let raw_category: String = row.get(5)?;
    let created_at = row
        .get(6)
        .unwrap_or_else(|_| OffsetDateTime::now_utc());

    Ok(Transaction {
        id,
        owner,
        description,
        amount,
        kind,
        category: Category::new_unchecked(raw_category),
        created_at,
    })
}

/// Build a transaction with fixed defaults for tests.
///
/// Tests that only care about one or two fields can override them on the
/// returned value.
#[cfg(test)]
pub(crate) fn test_builder(
    id: TransactionId,
    amount: f64,
    kind: TransactionKind,
    created_at: OffsetDateTime,
) -> Transaction {
    Transaction {
        id,
        owner: UserID::new(1),
        description: format!("test transaction {id}"),
        amount,
        kind,
        category: Category::new_unchecked(kind.categories()[0]),
        created_at,
    }
}
