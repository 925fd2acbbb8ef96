//! Products API - REST server with JSON, XML and YAML representations

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_with_retry, run_migrations};
use domain_products::InMemoryProductStore;
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod state;

use config::Config;
use state::{AppState, StoreHandle};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Select the product store
    let store = match &config.postgres {
        Some(postgres) => {
            info!("Connecting to PostgreSQL");
            let db = connect_with_retry(postgres.clone(), None).await?;
            run_migrations::<Migrator>(&db, config.app.name).await?;
            StoreHandle::Postgres(db)
        }
        None => {
            warn!("DATABASE_URL not set, products are kept in memory and lost on shutdown");
            StoreHandle::InMemory(InMemoryProductStore::new())
        }
    };

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        store,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let app = create_router(
        api_routes,
        &state.config.server,
        &state.config.cors_allowed_origins,
    )?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    // Run REST server with graceful shutdown
    let store = state.store.clone();
    create_production_app(app, &state.config.server, Duration::from_secs(30), async move {
        if let StoreHandle::Postgres(db) = store {
            info!("Shutting down: closing PostgreSQL connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connection pool closed"),
                Err(e) => warn!("Failed to close PostgreSQL connection pool: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
