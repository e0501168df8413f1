//! # Auth Service
//!
//! Username/password authentication over HTTP, built with Axum and Tokio:
//! register a user, verify credentials, and issue a short-lived HS256 token.
//!
//! ## Architecture
//! - `config`: environment variable configuration
//! - `database`: Postgres pool, migrations, and the credential store
//! - `auth`: bcrypt hashing, token issuance, and the signup/login service
//! - `routes`: HTTP handlers
//!   - `auth`: `POST /signup`, `POST /login`
//!   - `health`: `GET /ping`, `GET /health`
//! - `server`: router assembly and startup
//!
//! ## Environment Setup
//! `JWT_SECRET` is required. Database access comes from `DATABASE_URL` or
//! the discrete `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! variables; a `.env` file is loaded if present.
//!
//! ```bash
//! JWT_SECRET=change-me DATABASE_URL=postgres://postgres@localhost/auth cargo run
//! curl -X POST localhost:8080/signup -H 'content-type: application/json' \
//!      -d '{"username":"alice","password":"pw1"}'
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod server;

pub use error::{AuthError, PasswordError, StoreError};
