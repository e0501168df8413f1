use auth_service::{config::Config, server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Loads `.env`, initializes logging, reads configuration and runs the HTTP
/// server until the process is terminated. Startup failures (missing
/// `JWT_SECRET`, unreachable database, port in use) end the process with an
/// error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silently ignored if no .env exists.
    dotenv::dotenv().ok();

    // Respects RUST_LOG; defaults to info for this crate and tower_http.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    tracing::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    server::start(config).await
}
