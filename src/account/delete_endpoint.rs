//! Defines the endpoint for deleting an account.
//!
//! Deleting an account cascades to the transactions that reference it via the
//! foreign key on the transactions table.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, Error, account::core::AccountId};

/// The state needed to delete an account.
#[derive(Debug, Clone)]
pub struct DeleteAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an account, responds with a confirmation
/// message.
pub async fn delete_account_endpoint(
    State(state): State<DeleteAccountState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_account(&account_id, &connection) {
        Ok(rows_affected) if rows_affected != 0 => (
            StatusCode::OK,
            Json(json!({"message": "Account deleted successfully"})),
        )
            .into_response(),
        Ok(_) => Error::AccountNotFound(account_id).into_response(),
        Err(error) => {
            tracing::error!("Could not delete account {account_id}: {error}");
            error.into_response()
        }
    }
}

type RowsAffected = usize;

fn delete_account(id: &str, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM accounts WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}
