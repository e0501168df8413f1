//! Credential Store
//!
//! The username → password hash table behind signup and login. The trait is
//! the seam the auth service depends on; [`PgCredentialStore`] is the
//! production implementation.

use async_trait::async_trait;
use tokio_postgres::error::SqlState;

use crate::database::connection::DatabaseConnection;
use crate::database::models::{FromRow, User};
use crate::error::StoreError;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the user with this exact username, if any.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Fails with [`StoreError::Duplicate`] when the
    /// username is taken, including when a concurrent insert won the race.
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Postgres-backed store over the pooled connection.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    db: DatabaseConnection,
}

impl PgCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let client = self.db.pool().get().await?;
        let row = client
            .query_opt(
                "SELECT username, password FROM users WHERE username = $1",
                &[&username],
            )
            .await?;
        Ok(row.as_ref().map(User::from_row).transpose()?)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let client = self.db.pool().get().await?;
        client
            .execute(
                "INSERT INTO users (username, password) VALUES ($1, $2)",
                &[&user.username, &user.password_hash],
            )
            .await
            .map_err(classify_insert_error)?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let client = self.db.pool().get().await?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}

/// Unique violations (SQLSTATE 23505) become [`StoreError::Duplicate`].
fn classify_insert_error(err: tokio_postgres::Error) -> StoreError {
    if is_unique_violation(err.code()) {
        StoreError::Duplicate
    } else {
        StoreError::Query(err)
    }
}

fn is_unique_violation(code: Option<&SqlState>) -> bool {
    code == Some(&SqlState::UNIQUE_VIOLATION)
}
