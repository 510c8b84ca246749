mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod list_endpoint;
mod update_endpoint;

pub use core::{Account, AccountId, AccountName, create_account_table, get_account};
pub use create_endpoint::{create_account, create_account_endpoint};
pub use delete_endpoint::delete_account_endpoint;
pub use get_endpoint::get_account_endpoint;
pub use list_endpoint::list_accounts_endpoint;
pub use update_endpoint::update_account_endpoint;
