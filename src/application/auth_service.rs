use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{LoginRequest, Profile, SignupRequest};
use crate::infrastructure::security::{
    TokenClaims, generate_token, hash_password, validate_token, verify_password,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Signup, login, and token verification. Holds the process-wide signing
/// secret; repositories are injected so tests can substitute a fake store.
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    /// Email uniqueness is enforced by the store, not pre-checked here;
    /// a constraint violation surfaces as `DomainError::DuplicateEmail`.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn signup(&self, req: SignupRequest) -> Result<i32> {
        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let id = self
            .user_repository
            .create_user(&req.username, &req.email, &password_hash)
            .await?;

        info!(user_id = id, email = %req.email, "User registered successfully");
        Ok(id)
    }

    /// An unknown email and a wrong password fail identically, so the
    /// response does not reveal which emails are registered.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<String> {
        let user = self
            .user_repository
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "Login attempt for unknown email");
                DomainError::InvalidCredentials
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = user.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        let token = generate_token(user.id, &user.username, &self.jwt_secret).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;

        info!(user_id = user.id, "Login successful");
        Ok(token)
    }

    /// The one reusable authorization step: a raw token in, a typed
    /// identity out. Every protected route goes through here.
    pub fn authenticate(&self, token: &str) -> Result<TokenClaims, DomainError> {
        validate_token(token, &self.jwt_secret).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            DomainError::InvalidToken
        })
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    pub async fn profile(&self, user_id: i32) -> Result<Profile> {
        // A verified token whose subject no longer exists is treated as an
        // invalid credential. Unreachable in practice: no delete path.
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user_id, "Token subject not found in store");
                DomainError::InvalidToken
            })?;

        Ok(Profile::from(user))
    }
}
