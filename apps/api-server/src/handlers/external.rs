//! Public passthrough searches against TMDB and Spotify.

use actix_web::{HttpResponse, web};

use twogether_shared::ApiResponse;
use twogether_shared::dto::{MovieSearchQuery, MusicSearchQuery, PopularSongsQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn required(query: Option<&str>) -> AppResult<&str> {
    query.ok_or_else(|| AppError::BadRequest("The 'query' parameter is required".to_string()))
}

/// GET /api/external/movies/search?query=&page=
pub async fn search_movies(
    state: web::Data<AppState>,
    params: web::Query<MovieSearchQuery>,
) -> AppResult<HttpResponse> {
    let query = required(params.query())?;
    let page = state.tmdb.search(query, params.page()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/external/movies/popular?page=
pub async fn popular_movies(
    state: web::Data<AppState>,
    params: web::Query<MovieSearchQuery>,
) -> AppResult<HttpResponse> {
    let page = state.tmdb.popular(params.page()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/external/movies/{tmdb_id}
pub async fn movie_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let details = state.tmdb.details(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(details)))
}

/// GET /api/external/songs/search?query=&limit=20&offset=0
pub async fn search_songs(
    state: web::Data<AppState>,
    params: web::Query<MusicSearchQuery>,
) -> AppResult<HttpResponse> {
    let query = required(params.query())?;
    let page = state
        .spotify
        .search_tracks(query, params.limit(), params.offset())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/external/songs/popular?country=MX
pub async fn popular_songs(
    state: web::Data<AppState>,
    params: web::Query<PopularSongsQuery>,
) -> AppResult<HttpResponse> {
    let country = params.country();
    let tracks = state.spotify.popular_tracks(&country).await?;
    tracing::debug!(%country, count = tracks.len(), "Popular songs fetched");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tracks)))
}

/// GET /api/external/songs/{spotify_id}
pub async fn song_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let track = state.spotify.track(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(track)))
}

/// GET /api/external/albums/search?query=&limit=20&offset=0
pub async fn search_albums(
    state: web::Data<AppState>,
    params: web::Query<MusicSearchQuery>,
) -> AppResult<HttpResponse> {
    let query = required(params.query())?;
    let page = state
        .spotify
        .search_albums(query, params.limit(), params.offset())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/external/albums/{spotify_id}
pub async fn album_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let album = state.spotify.album(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(album)))
}
