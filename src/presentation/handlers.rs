use crate::application::auth_service::AuthService;
use crate::application::cart_service::CartService;
use crate::domain::error::DomainError;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services
pub struct AppState {
    pub auth: AuthService,
    pub cart: CartService,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Every failure a client can see. The display strings are the exact
/// response messages; internal error detail stays in the logs.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token")]
    NoToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Internal server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::DuplicateEmail => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::NoToken => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => actix_web::http::StatusCode::FORBIDDEN,
            ApiError::Internal => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            ApiError::DuplicateEmail => {
                warn!(status = %status, "Signup rejected: duplicate email")
            }
            ApiError::InvalidCredentials => {
                warn!(status = %status, "Login rejected: invalid credentials")
            }
            ApiError::NoToken => warn!(status = %status, "Request without token"),
            ApiError::InvalidToken => warn!(status = %status, "Request with invalid token"),
            ApiError::Internal => error!(status = %status, "Internal error"),
        }

        HttpResponse::build(status).json(MessageResponse::new(&self.to_string()))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateEmail => ApiError::DuplicateEmail,
            DomainError::InvalidCredentials => ApiError::InvalidCredentials,
            DomainError::MissingToken => ApiError::NoToken,
            DomainError::InvalidToken => ApiError::InvalidToken,
            DomainError::Internal(msg) => {
                error!(detail = %msg, "Internal domain error");
                ApiError::Internal
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain_err) => domain_err.into(),
            Err(other) => {
                // Store failures and anything else untyped: one generic
                // translation, never surfaced to the client.
                error!(detail = %other, "Unhandled error");
                ApiError::Internal
            }
        }
    }
}

// Handlers

#[instrument]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Pet store API is live"))
}

/// Tokens are not revocable; the server holds no session state to clear.
#[instrument]
pub async fn logout() -> HttpResponse {
    info!("Logout requested");
    HttpResponse::Ok().json(MessageResponse::new("Logout handled client-side"))
}
