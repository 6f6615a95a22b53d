//! # Twogether API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::handlers;
use api_server::state::{AppState, Repositories};
use api_server::telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Twogether API on {}:{}", config.host, config.port);

    let repos = repositories(&config).await;
    let state = AppState::new(repos, &config).map_err(std::io::Error::other)?;

    let frontend_url = config.frontend_url.clone();
    HttpServer::new(move || {
        let limiter = state.limiter.clone();
        App::new()
            .wrap(api_server::cors(&frontend_url))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, limiter))
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Postgres when configured and reachable (migrated on startup), otherwise
/// the in-memory store.
#[cfg(feature = "postgres")]
async fn repositories(config: &AppConfig) -> Repositories {
    use migration::{Migrator, MigratorTrait};
    use twogether_infra::database::{DatabaseConfig, connect};

    let Some(settings) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running on the in-memory store.");
        return Repositories::in_memory();
    };

    let db_config = DatabaseConfig {
        url: settings.url.clone(),
        max_connections: settings.max_connections,
        min_connections: settings.min_connections,
    };

    let db = match connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using the in-memory store.",
                e
            );
            return Repositories::in_memory();
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        tracing::error!("Migrations failed: {}. Using the in-memory store.", e);
        return Repositories::in_memory();
    }

    Repositories::postgres(db)
}

#[cfg(not(feature = "postgres"))]
async fn repositories(_config: &AppConfig) -> Repositories {
    tracing::info!("Built without postgres support. Running on the in-memory store.");
    Repositories::in_memory()
}
