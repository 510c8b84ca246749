mod core;
mod create_endpoint;
mod list_endpoint;
mod month;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction,
    create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
