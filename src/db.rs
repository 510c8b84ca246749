//! Database initialization and shared helpers for the SQLite storage layer.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use uuid::Uuid;

use crate::{
    Error, account::create_account_table, category::create_category_table,
    transaction::create_transaction_table,
};

/// Create the application tables if they do not already exist.
///
/// Foreign keys are enforced at the connection level since SQLite leaves them
/// off by default.
///
/// # Errors
/// Returns an error if a table could not be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_account_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Generate an opaque unique ID for a new database record.
pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Round a monetary value to two fractional digits.
///
/// Monetary values are stored as fixed-point text with two fractional digits,
/// so values are rounded once on the way in and the in-memory record always
/// matches what the database holds.
pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a monetary value as the fixed-point text stored in the database.
pub(crate) fn to_fixed_point(value: f64) -> String {
    format!("{value:.2}")
}


#[cfg(test)]
mod money_text_tests {
    use super::{round_to_cents, to_fixed_point};

    #[test]
    fn round_trip_keeps_two_fractional_digits() {
        assert_eq!(to_fixed_point(round_to_cents(100.5)), "100.50");
        assert_eq!(to_fixed_point(round_to_cents(0.1 + 0.2)), "0.30");
    }

    #[test]
    fn record_ids_are_unique() {
        let first = super::new_record_id();
        let second = super::new_record_id();

        assert_ne!(first, second);
    }
}
