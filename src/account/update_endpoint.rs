//! Defines the endpoint for updating an account.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, params};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    account::core::{Account, AccountId, AccountName, get_account},
    db::{round_to_cents, to_fixed_point},
};

/// The state needed to update an account.
#[derive(Debug, Clone)]
pub struct UpdateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for updating an account.
///
/// Only the provided fields are applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    /// The new account name.
    pub name: Option<String>,
    /// The new starting balance in USD.
    pub starting_balance: Option<f64>,
}

/// A route handler for updating an account, responds with the updated record.
pub async fn update_account_endpoint(
    State(state): State<UpdateAccountState>,
    Path(account_id): Path<AccountId>,
    Json(request): Json<UpdateAccountRequest>,
) -> Response {
    let name = match request.name.as_deref().map(AccountName::new) {
        Some(Ok(name)) => Some(name),
        Some(Err(error)) => return error.into_response(),
        None => None,
    };

    if let Some(balance) = request.starting_balance
        && balance < 0.0
    {
        return Error::NegativeStartingBalance(balance).into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_account(&account_id, name, request.starting_balance, &connection) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(Error::NotFound) => Error::AccountNotFound(account_id).into_response(),
        Err(error) => {
            tracing::error!("Could not update account {account_id}: {error}");
            error.into_response()
        }
    }
}

/// Apply the provided fields to an account and refresh its updated timestamp.
///
/// # Errors
/// Returns an [Error::NotFound] if `id` does not refer to a valid account.
pub(crate) fn update_account(
    id: &str,
    name: Option<AccountName>,
    starting_balance: Option<f64>,
    connection: &Connection,
) -> Result<Account, Error> {
    let mut account = get_account(id, connection)?;

    if let Some(name) = name {
        account.name = name;
    }

    if let Some(balance) = starting_balance {
        account.starting_balance = round_to_cents(balance);
    }

    account.updated_at = OffsetDateTime::now_utc();

    connection.execute(
        "UPDATE accounts SET name = ?1, starting_balance = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            account.name.as_ref(),
            to_fixed_point(account.starting_balance),
            account.updated_at,
            account.id,
        ],
    )?;

    Ok(account)
}
