use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use cycle_insights_backend::config::{Config, StorageBackend};
use cycle_insights_backend::repository::{InMemoryCycleRepository, PgCycleRepository};
use cycle_insights_backend::routes::{self, SharedRepo};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let repo: SharedRepo = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL missing")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            Arc::new(PgCycleRepository::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("⚠️ Using in-memory storage, cycles are lost on restart");
            Arc::new(InMemoryCycleRepository::new())
        }
    };

    let app = routes::app(repo);

    let addr = config.bind_addr;
    tracing::info!("🧠 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
