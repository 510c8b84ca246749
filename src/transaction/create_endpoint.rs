//! Defines the endpoint for creating a new transaction.
//!
//! The referenced account and category are checked before inserting so the
//! client gets a 404 that names the missing resource rather than a bare
//! foreign key failure.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::get_account,
    category::get_category,
    transaction::core::{NewTransaction, TransactionType, create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// The value of the transaction in USD.
    pub amount: f64,
    /// The transaction type, 'income' or 'expense'.
    ///
    /// Parsed as a plain string so that an invalid value is reported as a
    /// validation error rather than a body deserialization failure.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Free text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The category the transaction is classified under.
    pub category_id: String,
}

/// A route handler for creating a new transaction, responds with the created
/// record.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Response {
    if request.amount <= 0.0 {
        return Error::NonPositiveAmount(request.amount).into_response();
    }

    let transaction_type: TransactionType = match request.transaction_type.parse() {
        Ok(transaction_type) => transaction_type,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_account(&request.account_id, &connection) {
        Ok(_) => {}
        Err(Error::NotFound) => {
            return Error::AccountNotFound(request.account_id).into_response();
        }
        Err(error) => {
            tracing::error!("Could not look up account {}: {error}", request.account_id);
            return error.into_response();
        }
    }

    match get_category(&request.category_id, &connection) {
        Ok(_) => {}
        Err(Error::NotFound) => {
            return Error::CategoryNotFound(request.category_id).into_response();
        }
        Err(error) => {
            tracing::error!("Could not look up category {}: {error}", request.category_id);
            return error.into_response();
        }
    }

    let new_transaction = NewTransaction {
        amount: request.amount,
        transaction_type,
        description: request.description,
        account_id: request.account_id,
        category_id: request.category_id,
    };

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}
