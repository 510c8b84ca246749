//! End-to-end tests that exercise the REST API through a real router and an
//! in-memory SQLite database.

use axum::http::StatusCode;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use wallet_rs::{
    AppState, build_router,
    endpoints::{self, format_endpoint},
};

fn get_test_server() -> TestServer {
    let (server, _) = get_test_server_with_state();
    server
}

fn get_test_server_with_state() -> (TestServer, AppState) {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let state = AppState::new(connection).expect("Could not initialize database");
    let server = TestServer::new(build_router(state.clone()));

    (server, state)
}

async fn create_account(server: &TestServer, name: &str, starting_balance: f64) -> Value {
    let response = server
        .post(endpoints::ACCOUNTS)
        .json(&json!({"name": name, "startingBalance": starting_balance}))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn create_category(server: &TestServer, name: &str) -> Value {
    let response = server.post(endpoints::CATEGORIES).json(&json!({"name": name})).await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn create_account_returns_created_record() {
    let server = get_test_server();

    let account = create_account(&server, "Savings", 100.50).await;

    assert_eq!(account["name"], "Savings");
    assert_eq!(account["startingBalance"], 100.5);
    assert!(account["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(account["createdAt"].is_string());
    assert!(account["updatedAt"].is_string());
}

#[tokio::test]
async fn create_account_with_negative_balance_is_rejected() {
    let server = get_test_server();

    let response = server
        .post(endpoints::ACCOUNTS)
        .json(&json!({"name": "Overdrawn", "startingBalance": -100.0}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "startingBalance");
}

#[tokio::test]
async fn account_round_trips_through_get() {
    let server = get_test_server();
    let created = create_account(&server, "Savings", 100.50).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format_endpoint(endpoints::ACCOUNT, id)).await;

    response.assert_status(StatusCode::OK);

    let got = response.json::<Value>();
    assert_eq!(got["name"], created["name"]);
    assert_eq!(got["startingBalance"], created["startingBalance"]);
}

#[tokio::test]
async fn get_unknown_account_is_404() {
    let server = get_test_server();

    let response = server.get(&format_endpoint(endpoints::ACCOUNT, "no-such-account")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Account not found");
}

#[tokio::test]
async fn patch_applies_only_provided_fields() {
    let server = get_test_server();
    let created = create_account(&server, "Savings", 100.0).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .patch(&format_endpoint(endpoints::ACCOUNT, id))
        .json(&json!({"startingBalance": 50.0}))
        .await;

    response.assert_status(StatusCode::OK);

    let updated = response.json::<Value>();
    assert_eq!(updated["name"], "Savings");
    assert_eq!(updated["startingBalance"], 50.0);
}

#[tokio::test]
async fn patch_unknown_account_is_404() {
    let server = get_test_server();

    let response = server
        .patch(&format_endpoint(endpoints::ACCOUNT, "no-such-account"))
        .json(&json!({"name": "Renamed"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_account_cascades_to_its_transactions() {
    let server = get_test_server();
    let account = create_account(&server, "Savings", 0.0).await;
    let category = create_category(&server, "Groceries").await;

    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "amount": 12.50,
            "type": "expense",
            "accountId": account["id"],
            "categoryId": category["id"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let account_id = account["id"].as_str().unwrap();
    let response = server.delete(&format_endpoint(endpoints::ACCOUNT, account_id)).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>()["message"],
        "Account deleted successfully"
    );

    let transactions = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
    assert_eq!(transactions, json!([]));
}

#[tokio::test]
async fn categories_are_listed_in_name_order() {
    let server = get_test_server();
    create_category(&server, "Transport").await;
    create_category(&server, "Groceries").await;

    let response = server.get(endpoints::CATEGORIES).await;

    response.assert_status(StatusCode::OK);

    let categories = response.json::<Value>();
    assert_eq!(categories[0]["name"], "Groceries");
    assert_eq!(categories[1]["name"], "Transport");
}

#[tokio::test]
async fn create_category_with_empty_name_is_rejected() {
    let server = get_test_server();

    let response = server.post(endpoints::CATEGORIES).json(&json!({"name": ""})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Validation failed");
}

#[tokio::test]
async fn transaction_with_unknown_account_is_404_and_not_persisted() {
    let server = get_test_server();
    let category = create_category(&server, "Groceries").await;

    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "amount": 10.0,
            "type": "income",
            "accountId": "a1",
            "categoryId": category["id"],
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Account not found");

    let transactions = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
    assert_eq!(transactions, json!([]));
}

#[tokio::test]
async fn transaction_with_negative_amount_is_rejected() {
    let server = get_test_server();
    let account = create_account(&server, "Savings", 0.0).await;
    let category = create_category(&server, "Groceries").await;

    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "amount": -5.0,
            "type": "expense",
            "accountId": account["id"],
            "categoryId": category["id"],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["details"][0]["field"], "amount");
}

#[tokio::test]
async fn transaction_with_unknown_type_is_rejected() {
    let server = get_test_server();
    let account = create_account(&server, "Savings", 0.0).await;
    let category = create_category(&server, "Groceries").await;

    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "amount": 5.0,
            "type": "transfer",
            "accountId": account["id"],
            "categoryId": category["id"],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["details"][0]["field"], "type");
}

#[tokio::test]
async fn transactions_listing_is_limited_to_the_current_month() {
    let (server, state) = get_test_server_with_state();
    let account = create_account(&server, "Savings", 0.0).await;
    let category = create_category(&server, "Groceries").await;

    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "amount": 10.0,
            "type": "income",
            "description": "this month",
            "accountId": account["id"],
            "categoryId": category["id"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let current_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "amount": 99.0,
            "type": "expense",
            "description": "last year",
            "accountId": account["id"],
            "categoryId": category["id"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let old_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    // Backdate the second transaction to push it out of the window.
    {
        let connection = state.db_connection.lock().unwrap();
        connection
            .execute(
                "UPDATE transactions SET created_at = '2020-01-15T12:00:00Z' WHERE id = ?1",
                (&old_id,),
            )
            .unwrap();
    }

    let transactions = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
    let transactions = transactions.as_array().unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["id"], current_id.as_str());
}

#[tokio::test]
async fn unknown_route_gets_json_404() {
    let server = get_test_server();

    let response = server.get("/api/widgets").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Not found");
}
