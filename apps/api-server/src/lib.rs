//! # Twogether API Server
//!
//! actix-web application: configuration, state wiring, middleware and the
//! HTTP handlers. `main.rs` only boots it.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy: the configured frontend origin, with credentials.
pub fn cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}
