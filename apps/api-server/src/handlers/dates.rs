//! Date and note handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use twogether_shared::ApiResponse;
use twogether_shared::dto::{
    AddNoteRequest, CreateDateRequest, DateListQuery, DateResponse, NoteRequest, NoteResponse,
    NotesResponse, UpdateDateRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/dates
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateDateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let date = state.dates.create(identity.user_id, req.into()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        DateResponse::from(date),
        "Date created",
    )))
}

/// GET /api/dates?kind=&from=&to=&limit=&offset=
pub async fn list(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<DateListQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .dates
        .list(identity.user_id, query.filter(), query.page())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page.map(DateResponse::from))))
}

/// GET /api/dates/{id}
pub async fn get(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let date = state.dates.get(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DateResponse::from(date))))
}

/// PUT /api/dates/{id}
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let date = state
        .dates
        .update(identity.user_id, path.into_inner(), req.into())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DateResponse::from(date),
        "Date updated",
    )))
}

/// DELETE /api/dates/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .dates
        .delete(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Date deleted")))
}

/// POST /api/dates/notes
pub async fn add_note(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<AddNoteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let note = state
        .dates
        .add_note(identity.user_id, req.date_id, &req.text)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        NoteResponse::from(note),
        "Note added",
    )))
}

/// GET /api/dates/{id}/notes
pub async fn list_notes(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let notes = state
        .dates
        .list_notes(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(NotesResponse::from(notes))))
}

/// PUT /api/dates/notes/{id}
pub async fn update_note(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<NoteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let note = state
        .dates
        .update_note(identity.user_id, path.into_inner(), &req.text)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        NoteResponse::from(note),
        "Note updated",
    )))
}

/// DELETE /api/dates/notes/{id}
pub async fn delete_note(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .dates
        .delete_note(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Note deleted")))
}
