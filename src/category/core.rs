//! Core category domain types and queries.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for a category.
pub type CategoryId = String;

/// The longest category name that will be accepted.
pub(crate) const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// A validated, non-empty category name of at most
/// [MAX_CATEGORY_NAME_LENGTH] characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// an empty string, or an [Error::CategoryNameTooLong] if `name` is
    /// longer than [MAX_CATEGORY_NAME_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyCategoryName);
        }

        if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
            return Err(Error::CategoryNameTooLong);
        }

        Ok(Self(name.to_string()))
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty and no longer
    /// than [MAX_CATEGORY_NAME_LENGTH] characters.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A label used to classify transactions (e.g., 'Groceries', 'Salary').
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The id for the category.
    pub id: CategoryId,
    /// The name of the category.
    pub name: CategoryName,
    /// The owning user, reserved for multi-user support.
    pub user_id: Option<String>,
    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the category was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Initialize the categories table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            user_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name);",
    )?;

    Ok(())
}

pub(crate) fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;

    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category {
        id,
        name,
        user_id: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// This function will return an [Error::NotFound] if `id` does not refer to a
/// valid category, or an [Error::SqlError] if there is some other SQL error.
pub fn get_category(id: &str, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, user_id, created_at, updated_at FROM categories WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row_to_category)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub(crate) fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, user_id, created_at, updated_at FROM categories ORDER BY name ASC",
        )?
        .query_map([], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}
