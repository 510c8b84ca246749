//! Defines the endpoint for getting a single account by ID.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::core::{AccountId, get_account},
};

/// The state needed to get an account.
#[derive(Debug, Clone)]
pub struct GetAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for getting an account by ID.
pub async fn get_account_endpoint(
    State(state): State<GetAccountState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_account(&account_id, &connection) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(Error::NotFound) => Error::AccountNotFound(account_id).into_response(),
        Err(error) => {
            tracing::error!("Could not fetch account {account_id}: {error}");
            error.into_response()
        }
    }
}
