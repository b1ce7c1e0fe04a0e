//! Creates the database schema for the application's domain models.

use rusqlite::Connection;

use crate::{transaction::create_transaction_table, user::create_user_table};

/// Create the tables for the application's domain models.
///
/// Safe to call on an existing database; tables are only created if they do
/// not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_user_table(connection)?;
    create_transaction_table(connection)?;

    Ok(())
}
