//! # Authentication Module
//!
//! Password hashing, token issuance, and the signup/login orchestration that
//! ties them to the credential store.

pub mod jwt;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{Claims, IssuedToken, JwtService};
pub use models::{AuthSuccess, Credentials, CredentialsRequest};
pub use password::PasswordHasher;
pub use service::AuthService;
