//! Defines the endpoint for creating a new category.

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
    category::{Category, CategoryName},
    db::new_record_id,
};

/// The state needed to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// The category name.
    pub name: String,
}

/// A route handler for creating a new category, responds with the created
/// record.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Response {
    let name = match CategoryName::new(&request.name) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_category(name, &connection) {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(error) => {
            tracing::error!("Could not create category {:?}: {error}", request.name);
            error.into_response()
        }
    }
}

/// Create a category and return it with its generated ID and timestamps.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    let now = OffsetDateTime::now_utc();
    let category = Category {
        id: new_record_id(),
        name,
        user_id: None,
        created_at: now,
        updated_at: now,
    };

    connection.execute(
        "INSERT INTO categories (id, name, user_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            category.id,
            category.name.as_ref(),
            category.user_id,
            category.created_at,
            category.updated_at,
        ],
    )?;

    Ok(category)
}
