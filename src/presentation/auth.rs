use crate::domain::user::{LoginRequest, SignupRequest};
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use crate::presentation::middleware::bearer_token;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Signup request received");

    state.auth.signup(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("User registered")))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Login request received");

    let token = state.auth.login(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// The one route that distinguishes a wholly missing header (401) from a
/// token that fails verification (403).
#[instrument(skip(state, req))]
pub async fn profile(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    if !req.headers().contains_key(actix_web::http::header::AUTHORIZATION) {
        return Err(ApiError::NoToken);
    }

    let claims = bearer_token(&req)
        .ok_or(ApiError::InvalidToken)
        .and_then(|token| state.auth.authenticate(token).map_err(ApiError::from))?;

    let profile = state.auth.profile(claims.user_id).await?;

    info!(user_id = claims.user_id, "Profile retrieved");
    Ok(HttpResponse::Ok().json(profile))
}
