use actix_web::{HttpResponse, web};
use serde::Serialize;

use twogether_shared::ApiResponse;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    /// `postgres` or `memory`.
    pub storage: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health and GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok_with_message(
        Health {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            storage: state.storage,
            timestamp: chrono::Utc::now(),
        },
        "Twogether API is running",
    ))
}
