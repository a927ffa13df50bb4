//! Payroll Engine HTTP service.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, ServerSettings};
use payroll_engine::storage::{MemoryStore, PayrollStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_line_number(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = ServerSettings::from_env()?;
    let config = ConfigLoader::load(&settings.config_dir)?;

    let store: Arc<dyn PayrollStore> = match &settings.seed_file {
        Some(path) => Arc::new(MemoryStore::from_seed_file(path)?),
        None => Arc::new(MemoryStore::new()),
    };

    let app = create_router(AppState::new(store, &config));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "Payroll engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
