//! Core account domain types and queries.

use std::fmt::Display;

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for an account.
pub type AccountId = String;

/// The longest account name that will be accepted.
pub(crate) const MAX_ACCOUNT_NAME_LENGTH: usize = 100;

/// A validated, non-empty account name of at most
/// [MAX_ACCOUNT_NAME_LENGTH] characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountName(String);

impl AccountName {
    /// Create an account name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyAccountName] if `name` is an
    /// empty string, or an [Error::AccountNameTooLong] if `name` is longer
    /// than [MAX_ACCOUNT_NAME_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyAccountName);
        }

        if name.chars().count() > MAX_ACCOUNT_NAME_LENGTH {
            return Err(Error::AccountNameTooLong);
        }

        Ok(Self(name.to_string()))
    }

    /// Create an account name without validation.
    ///
    /// The caller should ensure that the string is not empty and no longer
    /// than [MAX_ACCOUNT_NAME_LENGTH] characters. This function is intended
    /// for names that have already been validated, e.g. names read back from
    /// the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for AccountName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named money container with a starting balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The name of the account.
    pub name: AccountName,
    /// The money in the account when it was added, in the canonical storage
    /// currency (USD).
    pub starting_balance: f64,
    /// The owning user, reserved for multi-user support.
    pub user_id: Option<String>,
    /// When the account was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the account was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Initialize the accounts table.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            starting_balance TEXT NOT NULL DEFAULT '0.00',
            user_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub(crate) fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;

    let raw_name: String = row.get(1)?;
    let name = AccountName::new_unchecked(&raw_name);

    // Monetary values are stored as fixed-point text and served as numbers.
    let raw_balance: String = row.get(2)?;
    let starting_balance = raw_balance
        .parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;

    Ok(Account {
        id,
        name,
        starting_balance,
        user_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Retrieve a single account by ID.
///
/// # Errors
/// This function will return an [Error::NotFound] if `id` does not refer to a
/// valid account, or an [Error::SqlError] if there is some other SQL error.
pub fn get_account(id: &str, connection: &Connection) -> Result<Account, Error> {
    connection
        .prepare(
            "SELECT id, name, starting_balance, user_id, created_at, updated_at
            FROM accounts WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row_to_account)
        .map_err(|error| error.into())
}

/// Retrieve all accounts ordered by creation time.
pub(crate) fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, name, starting_balance, user_id, created_at, updated_at
            FROM accounts ORDER BY created_at ASC",
        )?
        .query_map([], map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(|error| error.into()))
        .collect()
}
