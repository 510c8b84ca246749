//! Core transaction domain types and queries.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row, params, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{new_record_id, round_to_cents, to_fixed_point},
    transaction::month::MonthWindow,
};

/// Database identifier for a transaction.
pub type TransactionId = String;

/// Whether a transaction adds money to an account or removes it.
///
/// The stored amount is always positive; the type carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the account.
    Income,
    /// Money leaving the account.
    Expense,
}

impl TransactionType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::InvalidTransactionType(other.to_string())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense event tied to one account and one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The id for the transaction.
    pub id: TransactionId,
    /// The value of the transaction in USD, always positive.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Free text detailing the transaction.
    pub description: Option<String>,
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The category the transaction is classified under.
    pub category_id: String,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The validated data for a transaction that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The value of the transaction in USD, always positive.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// Free text detailing the transaction.
    pub description: Option<String>,
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The category the transaction is classified under.
    pub category_id: String,
}

/// Initialize the transactions table.
///
/// Deleting an account cascades to its transactions; deleting a category
/// that still has transactions is rejected.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id TEXT PRIMARY KEY,
            amount TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            description TEXT,
            account_id TEXT NOT NULL
                REFERENCES accounts(id) ON UPDATE CASCADE ON DELETE CASCADE,
            category_id TEXT NOT NULL
                REFERENCES categories(id) ON UPDATE CASCADE ON DELETE RESTRICT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_created_at
            ON transactions(created_at);",
    )?;

    Ok(())
}

pub(crate) fn map_row_to_transaction(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;

    let raw_amount: String = row.get(1)?;
    let amount = raw_amount
        .parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(error)))?;

    let raw_type: String = row.get(2)?;
    let transaction_type = raw_type
        .parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;

    Ok(Transaction {
        id,
        amount,
        transaction_type,
        description: row.get(3)?,
        account_id: row.get(4)?,
        category_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Create a transaction and return it with its generated ID and timestamps.
///
/// The caller is expected to have validated the amount and checked that the
/// referenced account and category exist; the foreign keys back those checks
/// up at the storage level.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();
    let transaction = Transaction {
        id: new_record_id(),
        amount: round_to_cents(new_transaction.amount),
        transaction_type: new_transaction.transaction_type,
        description: new_transaction.description,
        account_id: new_transaction.account_id,
        category_id: new_transaction.category_id,
        created_at: now,
        updated_at: now,
    };

    connection.execute(
        "INSERT INTO transactions
            (id, amount, type, description, account_id, category_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            transaction.id,
            to_fixed_point(transaction.amount),
            transaction.transaction_type.as_str(),
            transaction.description,
            transaction.account_id,
            transaction.category_id,
            transaction.created_at,
            transaction.updated_at,
        ],
    )?;

    Ok(transaction)
}

/// Retrieve the transactions whose creation time falls within `window`,
/// ordered newest first.
pub(crate) fn get_transactions_in_window(
    window: MonthWindow,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, type, description, account_id, category_id, created_at, updated_at
            FROM transactions
            WHERE created_at >= :start AND created_at < :end
            ORDER BY created_at DESC",
        )?
        .query_map(
            &[(":start", &window.start), (":end", &window.end)],
            map_row_to_transaction,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}


#[cfg(test)]
mod transaction_query_tests {
    use rusqlite::Connection;

    use crate::{
        account::{Account, AccountName, create_account},
        category::{Category, CategoryName, create_category},
        db::initialize,
        transaction::month::current_month_window,
    };

    use super::{NewTransaction, TransactionType, create_transaction, get_transactions_in_window};

    fn get_test_fixtures() -> (Connection, Account, Category) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let account = create_account(AccountName::new_unchecked("Savings"), 0.0, &conn).unwrap();
        let category = create_category(CategoryName::new_unchecked("Groceries"), &conn).unwrap();

        (conn, account, category)
    }

    fn new_transaction(account: &Account, category: &Category) -> NewTransaction {
        NewTransaction {
            amount: 12.3,
            transaction_type: TransactionType::Expense,
            description: Some("weekly shop".to_string()),
            account_id: account.id.clone(),
            category_id: category.id.clone(),
        }
    }

    #[test]
    fn create_round_trips_through_window_query() {
        let (conn, account, category) = get_test_fixtures();
        let want = create_transaction(new_transaction(&account, &category), &conn).unwrap();

        let got = get_transactions_in_window(current_month_window(), &conn).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn create_rejects_unknown_account_at_storage_level() {
        let (conn, _, category) = get_test_fixtures();
        let orphan = NewTransaction {
            amount: 1.0,
            transaction_type: TransactionType::Income,
            description: None,
            account_id: "missing".to_string(),
            category_id: category.id,
        };

        let result = create_transaction(orphan, &conn);

        assert!(result.is_err(), "expected foreign key violation");
    }

    #[test]
    fn window_query_excludes_other_months() {
        let (conn, account, category) = get_test_fixtures();
        let old = create_transaction(new_transaction(&account, &category), &conn).unwrap();
        conn.execute(
            "UPDATE transactions SET created_at = '2020-01-15T12:00:00Z' WHERE id = ?1",
            (&old.id,),
        )
        .unwrap();
        let current = create_transaction(new_transaction(&account, &category), &conn).unwrap();

        let got = get_transactions_in_window(current_month_window(), &conn).unwrap();

        assert_eq!(got, vec![current]);
    }

    #[test]
    fn window_query_orders_newest_first() {
        let (conn, account, category) = get_test_fixtures();
        let older = create_transaction(new_transaction(&account, &category), &conn).unwrap();
        let window = current_month_window();
        // Pin the older row to the start of the window so the ordering is
        // deterministic.
        conn.execute(
            "UPDATE transactions SET created_at = ?1 WHERE id = ?2",
            rusqlite::params![window.start, older.id],
        )
        .unwrap();
        let newer = create_transaction(new_transaction(&account, &category), &conn).unwrap();

        let got = get_transactions_in_window(window, &conn).unwrap();

        let ids: Vec<&str> = got.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
    }
}
