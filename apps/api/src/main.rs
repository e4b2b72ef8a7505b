use axum::Router;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::run_migrations;
use domain_products::{PgProductRepository, ProductService, handlers};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod config;
mod openapi;
mod routes;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Connect eagerly with retry; fall back to a lazy pool so the
    // process still serves (and /ready reports the outage) when the
    // database is unreachable at startup.
    let db = match database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        None,
    )
    .await
    {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            database::postgres::connect_lazy(config.database.clone())
                .await
                .map_err(|e| eyre::eyre!("Failed to create database pool: {}", e))?
        }
    };

    if let Err(e) = run_migrations::<Migrator>(&db, "catalog_api").await {
        tracing::error!("Failed to run migrations: {}", e);
    }

    // Wire the products domain: repository -> service -> router
    let repository = PgProductRepository::new(db.clone());
    let service = ProductService::new(repository);
    let api_routes = Router::new().nest("/products", handlers::router(service));

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check with an actual db health check
    let app = router
        .merge(health_router(config.app.clone()))
        .merge(routes::ready_router(db.clone()));

    info!("Starting catalog API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown and cleanup
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
