//! Inventory API - REST server for product inventory

use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{handlers, PgProductRepository, ProductService};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Failed to connect to PostgreSQL: {}", e))?;

    let repository = PgProductRepository::new(db.clone());
    let service = ProductService::new(repository);

    let api_routes = Router::new().nest("/products", handlers::router(service));
    let app = create_router::<openapi::ApiDoc>(api_routes)
        .merge(health_router(config.app.clone()))
        .merge(api::ready_router(db.clone()));

    info!("Starting Inventory API on port {}", config.server.port);

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        if let Err(e) = db.close().await {
            tracing::warn!("Error while closing the database connection: {}", e);
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
