//! Couple linking handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use twogether_shared::ApiResponse;
use twogether_shared::dto::{CoupleResponse, InviteCodeResponse, LinkCoupleRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/couple/link
pub async fn link(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<LinkCoupleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let view = state
        .couples
        .link(identity.user_id, &req.invite_code)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        CoupleResponse::from(&view),
        "You are now linked with your partner",
    )))
}

/// POST /api/couple/unlink
pub async fn unlink(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let view = state.couples.unlink(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        CoupleResponse::from(&view),
        "Couple unlinked",
    )))
}

/// GET /api/couple/code
pub async fn code(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let invite_code = state.couples.code(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(InviteCodeResponse { invite_code })))
}

/// PUT /api/couple/code/regenerate
pub async fn regenerate_code(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let invite_code = state.couples.regenerate_code(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        InviteCodeResponse { invite_code },
        "Invite code regenerated",
    )))
}

/// GET /api/couple/info
pub async fn info(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let view = state.couples.info(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(CoupleResponse::from(&view))))
}
