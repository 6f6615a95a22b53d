//! Authentication handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use twogether_shared::ApiResponse;
use twogether_shared::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let registration = state.auth.register(req.into()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        RegisterResponse::from(registration),
        "Account created. Share your invite code with your partner.",
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        LoginResponse::from(session),
        "Logged in",
    )))
}

/// GET /api/auth/profile
pub async fn profile(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let profile = state.auth.profile(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileResponse::from(profile))))
}
