// # Routes Module
//
// HTTP route handlers, grouped by functionality:
// - `auth`: signup and login
// - `health`: liveness and readiness probes

/// Signup and login endpoints
pub mod auth;

/// Health check and monitoring endpoints
pub mod health;
