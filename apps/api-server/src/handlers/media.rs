//! Wish-list handlers. Movies, songs and albums share one set of generic
//! handlers; only adding and status changes differ per kind.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use twogether_core::domain::{Album, ListedItem, MediaItem, Movie, MovieStatus, Song};
use twogether_core::services::MediaService;
use twogether_shared::ApiResponse;
use twogether_shared::dto::{
    AddAlbumRequest, AddMovieRequest, AddSongRequest, CatalogParams, ListEntryResponse,
    ListQuery, StatusRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// A media kind with its own service in [`AppState`].
pub trait Listed: MediaItem {
    /// Label used in response messages.
    const LABEL: &'static str;

    fn service(state: &AppState) -> &MediaService<Self>;
}

impl Listed for Movie {
    const LABEL: &'static str = "Movie";

    fn service(state: &AppState) -> &MediaService<Self> {
        &state.movies
    }
}

impl Listed for Song {
    const LABEL: &'static str = "Song";

    fn service(state: &AppState) -> &MediaService<Self> {
        &state.songs
    }
}

impl Listed for Album {
    const LABEL: &'static str = "Album";

    fn service(state: &AppState) -> &MediaService<Self> {
        &state.albums
    }
}

/// GET /api/media/catalog/{movies|songs|albums} - public.
pub async fn catalog<M: Listed>(
    state: web::Data<AppState>,
    params: web::Query<CatalogParams>,
) -> AppResult<HttpResponse> {
    let page = M::service(&state)
        .catalog(&params.query(), params.page())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/media/{movies|songs|albums}?status=&limit=&offset=
pub async fn list<M: Listed>(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let status = query.status::<M::Status>().map_err(AppError::BadRequest)?;
    let page = M::service(&state)
        .list(identity.user_id, status, query.page())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page.map(ListEntryResponse::from))))
}

/// PUT /api/media/{songs|albums}/{id} with `{"status": ...}`
pub async fn set_status<M: Listed>(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<StatusRequest>,
) -> AppResult<HttpResponse> {
    let status = body.parse::<M::Status>().map_err(AppError::BadRequest)?;
    let listed = M::service(&state)
        .set_status(identity.user_id, path.into_inner(), status)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ListEntryResponse::from(listed),
        format!("{} marked as {}", M::LABEL, status),
    )))
}

/// PUT /api/media/movies/{id}/watched
pub async fn mark_watched(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let listed = state
        .movies
        .set_status(identity.user_id, path.into_inner(), MovieStatus::Watched)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ListEntryResponse::from(listed),
        "Movie marked as watched",
    )))
}

/// DELETE /api/media/{movies|songs|albums}/{id}
pub async fn remove<M: Listed>(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    M::service(&state)
        .remove(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "{} removed from your list",
        M::LABEL
    ))))
}

fn added<M: Listed>(listed: ListedItem<M>) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::ok_with_message(
        ListEntryResponse::from(listed),
        format!("{} added to your list", M::LABEL),
    ))
}

/// POST /api/media/movies
pub async fn add_movie(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<AddMovieRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let (movie, status) = req.into_parts();
    let listed = state.movies.add(identity.user_id, movie, status).await?;
    Ok(added(listed))
}

/// POST /api/media/songs
pub async fn add_song(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<AddSongRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let (song, status) = req.into_parts();
    let listed = state.songs.add(identity.user_id, song, status).await?;
    Ok(added(listed))
}

/// POST /api/media/albums
pub async fn add_album(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<AddAlbumRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let (album, status) = req.into_parts();
    let listed = state.albums.add(identity.user_id, album, status).await?;
    Ok(added(listed))
}
