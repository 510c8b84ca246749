mod core;
mod create_endpoint;
mod list_endpoint;

pub use core::{Category, CategoryId, CategoryName, create_category_table, get_category};
pub use create_endpoint::{create_category, create_category_endpoint};
pub use list_endpoint::list_categories_endpoint;
