//! Defines the endpoint for creating a new account.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, params};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    account::{Account, AccountName},
    db::{new_record_id, round_to_cents, to_fixed_point},
};

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// The account name.
    pub name: String,
    /// The money in the account when it was added, in USD.
    pub starting_balance: f64,
}

/// A route handler for creating a new account, responds with the created
/// record.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    Json(request): Json<CreateAccountRequest>,
) -> Response {
    let name = match AccountName::new(&request.name) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    if request.starting_balance < 0.0 {
        return Error::NegativeStartingBalance(request.starting_balance).into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_account(name, request.starting_balance, &connection) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(error) => {
            tracing::error!("Could not create account {:?}: {error}", request.name);
            error.into_response()
        }
    }
}

/// Create an account and return it with its generated ID and timestamps.
pub fn create_account(
    name: AccountName,
    starting_balance: f64,
    connection: &Connection,
) -> Result<Account, Error> {
    let now = OffsetDateTime::now_utc();
    let account = Account {
        id: new_record_id(),
        name,
        starting_balance: round_to_cents(starting_balance),
        user_id: None,
        created_at: now,
        updated_at: now,
    };

    connection.execute(
        "INSERT INTO accounts (id, name, starting_balance, user_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account.id,
            account.name.as_ref(),
            to_fixed_point(account.starting_balance),
            account.user_id,
            account.created_at,
            account.updated_at,
        ],
    )?;

    Ok(account)
}
