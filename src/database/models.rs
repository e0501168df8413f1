// Database Models
//
// Tokio-postgres compatible models for the credential table.

use tokio_postgres::Row;

/// Build a model from a query row.
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error>
    where
        Self: Sized;
}

/// A registered user as stored in the `users` table.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    /// bcrypt hash, stored in the `password` column
    pub password_hash: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            username: row.try_get("username")?,
            password_hash: row.try_get("password")?,
        })
    }
}
