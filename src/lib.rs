//! Wallet is a web app for tracking personal finances: accounts with a
//! starting balance, income/expense transactions recorded against accounts
//! and categories, and a view of the current month's activity.
//!
//! This library provides the REST API that serves JSON to the web client.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod currency;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod routing;
mod transaction;

pub use account::{Account, AccountId, AccountName, create_account, get_account};
pub use app_state::AppState;
pub use category::{Category, CategoryId, CategoryName, create_category, get_category};
pub use currency::{USD_TO_VND_RATE, Usd, Vnd, parse_vnd_input};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
