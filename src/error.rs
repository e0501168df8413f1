//! # Error Types
//!
//! Typed failures for each layer of the service. The store and hasher report
//! their own errors; [`AuthError`] is the taxonomy the orchestration layer
//! exposes, and the HTTP layer maps it to status codes.

use thiserror::Error;

/// Failures reported by a [`CredentialStore`](crate::database::CredentialStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The username is already taken (unique constraint violation).
    #[error("username already exists")]
    Duplicate,

    #[error("failed to get a connection from the pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("query failed: {0}")]
    Query(#[from] tokio_postgres::Error),
}

/// Failures reported by the [`PasswordHasher`](crate::auth::password::PasswordHasher).
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Outcome of a failed signup or login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    AlreadyExists,

    /// Returned both for unknown usernames and wrong passwords.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Storage, hashing or signing failure. Never shown to clients.
    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        AuthError::Internal(err.into())
    }

    /// Whether the error is the caller's fault (mapped to a 4xx response).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::Internal(_))
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => AuthError::AlreadyExists,
            other => AuthError::internal(other),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::internal(err)
    }
}
