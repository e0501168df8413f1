//! # Server Module
//!
//! HTTP server setup and route configuration.

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::AuthService;
use crate::config::Config;
use crate::database::{DatabaseConnection, PgCredentialStore};
use crate::routes::{auth, health};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }
}

/// Build the application router around `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health))
        .merge(auth::create_auth_routes())
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// Connects to the database, builds the auth service and serves HTTP until
/// the process is terminated.
pub async fn start(config: Config) -> Result<()> {
    let db = DatabaseConnection::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    let stats = db.stats();
    tracing::debug!("Pool ready: size={} idle={}", stats.size, stats.idle);

    let store = Arc::new(PgCredentialStore::new(db));
    let auth = AuthService::from_config(store, &config.auth)
        .context("Failed to prepare password hasher")?;
    tracing::info!(
        "Tokens expire after {}s, bcrypt cost {}",
        config.auth.token_ttl_secs,
        config.auth.bcrypt_cost
    );

    let app = create_router(AppState::new(auth));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/ping", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
