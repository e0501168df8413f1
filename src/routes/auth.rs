//! Auth routes for signup and login

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;

use crate::auth::models::{
    Credentials, CredentialsRequest, LoginResponse, MessageResponse, SignupResponse,
};
use crate::error::AuthError;
use crate::server::AppState;

const SIGNUP_FAILED: &str = "Server error during signup";
const LOGIN_FAILED: &str = "Login failed due to server error";

/// Error response carrying a status and a `{message}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map an auth failure. Client errors keep their own message; internal
    /// errors are logged and replaced with `internal_message`.
    pub fn from_auth(err: AuthError, internal_message: &str) -> Self {
        if err.is_client_error() {
            return Self::new(StatusCode::BAD_REQUEST, err.to_string());
        }
        tracing::error!("{}: {:#}", internal_message, err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
    }

    pub fn bad_body(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

fn credentials(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
    internal_message: &str,
) -> Result<Credentials, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;
    Credentials::try_from(request).map_err(|e| ApiError::from_auth(e, internal_message))
}

/// `POST /signup`
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, ApiError> {
    let creds = credentials(payload, SIGNUP_FAILED)?;
    let success = state
        .auth
        .signup(creds)
        .await
        .map_err(|e| ApiError::from_auth(e, SIGNUP_FAILED))?;
    Ok(Json(success.into()))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let creds = credentials(payload, LOGIN_FAILED)?;
    let success = state
        .auth
        .login(creds)
        .await
        .map_err(|e| ApiError::from_auth(e, LOGIN_FAILED))?;
    Ok(Json(success.into()))
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_detail() {
        let err = AuthError::internal(anyhow::anyhow!("connection refused"));
        let api = ApiError::from_auth(err, SIGNUP_FAILED);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Server error during signup");
    }

    #[test]
    fn client_errors_are_bad_request() {
        let api = ApiError::from_auth(AuthError::InvalidCredentials, LOGIN_FAILED);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "Invalid username or password");

        let api = ApiError::from_auth(AuthError::AlreadyExists, SIGNUP_FAILED);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "User already exists");
    }
}
