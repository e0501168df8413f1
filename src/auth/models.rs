//! Authentication Models
//!
//! Data structures for authentication requests, responses, and validated input.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Matches the width of the `users.username` column.
pub const MAX_USERNAME_LEN: usize = 255;

/// Body of `POST /signup` and `POST /login`. Fields are optional so that a
/// missing field is reported as a validation error rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Username and password that passed validation.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = AuthError;

    fn try_from(req: CredentialsRequest) -> Result<Self, Self::Error> {
        let (username, password) = match (req.username, req.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => {
                return Err(AuthError::Validation(
                    "Username and password are required".to_string(),
                ));
            }
        };

        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AuthError::Validation(format!(
                "Username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }

        Ok(Self { username, password })
    }
}

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub username: String,
    pub token: String,
}

/// `POST /signup` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}

impl From<AuthSuccess> for SignupResponse {
    fn from(success: AuthSuccess) -> Self {
        Self {
            message: "Signup successful".to_string(),
            token: success.token,
            username: success.username,
        }
    }
}

/// `POST /login` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

impl From<AuthSuccess> for LoginResponse {
    fn from(success: AuthSuccess) -> Self {
        Self {
            token: success.token,
            username: success.username,
        }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
