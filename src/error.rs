//! Defines the app level error type and its conversion to JSON HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create or rename an account.
    #[error("Account name is required")]
    EmptyAccountName,

    /// An account name longer than the maximum allowed length was used.
    #[error("Account name too long")]
    AccountNameTooLong,

    /// A negative starting balance was used to create or update an account.
    ///
    /// Accounts record the money available at the time they were opened,
    /// which cannot be negative. Debts are recorded as expense transactions.
    #[error("Starting balance must be non-negative, got {0}")]
    NegativeStartingBalance(f64),

    /// An empty string was used to create a category.
    #[error("Category name is required")]
    EmptyCategoryName,

    /// A category name longer than the maximum allowed length was used.
    #[error("Category name too long")]
    CategoryNameTooLong,

    /// A zero or negative amount was used to create a transaction.
    ///
    /// The sign of a transaction is carried by its type (income or expense),
    /// not by the stored amount.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    /// A string other than 'income' or 'expense' was used as a transaction type.
    #[error("Type must be income or expense, got \"{0}\"")]
    InvalidTransactionType(String),

    /// The account ID used in a request did not match an account in the database.
    #[error("the account ID \"{0}\" does not refer to a valid account")]
    AccountNotFound(String),

    /// The category ID used in a request did not match a category in the database.
    #[error("the category ID \"{0}\" does not refer to a valid category")]
    CategoryNotFound(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The request field that a validation error refers to, if any.
    fn field(&self) -> Option<&'static str> {
        match self {
            Error::EmptyAccountName | Error::AccountNameTooLong => Some("name"),
            Error::NegativeStartingBalance(_) => Some("startingBalance"),
            Error::EmptyCategoryName | Error::CategoryNameTooLong => Some("name"),
            Error::NonPositiveAmount(_) => Some("amount"),
            Error::InvalidTransactionType(_) => Some("type"),
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Validation errors report which field was rejected, mirroring the
        // shape the web client expects.
        if let Some(field) = self.field() {
            let body = json!({
                "error": "Validation failed",
                "details": [{"field": field, "message": self.to_string()}],
            });

            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        match self {
            Error::AccountNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Account not found"})),
            )
                .into_response(),
            Error::CategoryNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Category not found"})),
            )
                .into_response(),
            Error::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
            }
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Something went wrong, check the server logs for more details"
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    async fn response_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");

        serde_json::from_slice(&bytes).expect("response body was not valid JSON")
    }

    #[tokio::test]
    async fn validation_error_includes_field_details() {
        let response = Error::NegativeStartingBalance(-1.0).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_body(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["field"], "startingBalance");
    }

    #[tokio::test]
    async fn missing_account_maps_to_404() {
        let response = Error::AccountNotFound("a1".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response_body(response).await;
        assert_eq!(body["error"], "Account not found");
    }

    #[tokio::test]
    async fn unexpected_error_hides_details_from_client() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_body(response).await;
        let message = body["error"].as_str().expect("error should be a string");
        assert!(!message.contains("lock"), "got {message:?}");
    }
}
