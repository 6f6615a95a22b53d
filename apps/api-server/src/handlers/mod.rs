//! HTTP handlers and route configuration.

mod auth;
mod couple;
mod dates;
mod external;
mod health;
mod media;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use twogether_core::domain::{Album, Movie, Song};
use twogether_core::ports::RateLimiter;
use twogether_shared::{ApiResponse, ErrorResponse};

use crate::middleware::error::{json_error, path_error, query_error};
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes. `limiter` guards the auth endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Arc<dyn RateLimiter>) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("", web::get().to(index))
                .route("/", web::get().to(index))
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .wrap(RateLimitMiddleware::new(limiter))
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/profile", web::get().to(auth::profile)),
                )
                .service(
                    web::scope("/couple")
                        .route("/link", web::post().to(couple::link))
                        .route("/unlink", web::post().to(couple::unlink))
                        .route("/code", web::get().to(couple::code))
                        .route("/code/regenerate", web::put().to(couple::regenerate_code))
                        .route("/info", web::get().to(couple::info)),
                )
                .service(
                    web::scope("/dates")
                        .route("", web::post().to(dates::create))
                        .route("", web::get().to(dates::list))
                        .route("/notes", web::post().to(dates::add_note))
                        .route("/notes/{id}", web::put().to(dates::update_note))
                        .route("/notes/{id}", web::delete().to(dates::delete_note))
                        .route("/{id}/notes", web::get().to(dates::list_notes))
                        .route("/{id}", web::get().to(dates::get))
                        .route("/{id}", web::put().to(dates::update))
                        .route("/{id}", web::delete().to(dates::delete)),
                )
                .service(
                    web::scope("/media")
                        .route("/catalog/movies", web::get().to(media::catalog::<Movie>))
                        .route("/catalog/songs", web::get().to(media::catalog::<Song>))
                        .route("/catalog/albums", web::get().to(media::catalog::<Album>))
                        .route("/movies", web::post().to(media::add_movie))
                        .route("/movies", web::get().to(media::list::<Movie>))
                        .route("/movies/{id}/watched", web::put().to(media::mark_watched))
                        .route("/movies/{id}", web::delete().to(media::remove::<Movie>))
                        .route("/songs", web::post().to(media::add_song))
                        .route("/songs", web::get().to(media::list::<Song>))
                        .route("/songs/{id}", web::put().to(media::set_status::<Song>))
                        .route("/songs/{id}", web::delete().to(media::remove::<Song>))
                        .route("/albums", web::post().to(media::add_album))
                        .route("/albums", web::get().to(media::list::<Album>))
                        .route("/albums/{id}", web::put().to(media::set_status::<Album>))
                        .route("/albums/{id}", web::delete().to(media::remove::<Album>)),
                )
                .service(
                    web::scope("/external")
                        .route("/movies/search", web::get().to(external::search_movies))
                        .route("/movies/popular", web::get().to(external::popular_movies))
                        .route("/movies/{id}", web::get().to(external::movie_details))
                        .route("/songs/search", web::get().to(external::search_songs))
                        .route("/songs/popular", web::get().to(external::popular_songs))
                        .route("/songs/{id}", web::get().to(external::song_details))
                        .route("/albums/search", web::get().to(external::search_albums))
                        .route("/albums/{id}", web::get().to(external::album_details)),
                ),
        );
}

/// GET /api - lists the endpoint groups.
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok_with_message(
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "auth": "/api/auth",
                "couple": "/api/couple",
                "media": "/api/media",
                "dates": "/api/dates",
                "external": "/api/external",
            }
        }),
        "Twogether API",
    ))
}

/// Fallback for unknown routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::not_found(format!("No route for {} {}", req.method(), req.path()))
            .with_instance(req.path()),
    )
}
