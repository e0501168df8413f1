//! Database Migrations
//!
//! SQL migrations under `migrations/` are embedded at compile time and
//! applied with refinery.

use anyhow::{Context, Result};

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// Run all pending migrations
pub async fn run_migrations(client: &mut tokio_postgres::Client) -> Result<()> {
    tracing::info!("Running database migrations...");

    let report = embedded::migrations::runner()
        .run_async(client)
        .await
        .context("Failed to apply database migrations")?;

    for migration in report.applied_migrations() {
        tracing::info!("Applied migration {}", migration);
    }

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
