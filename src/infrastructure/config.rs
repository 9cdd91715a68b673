use anyhow::{Context, Result};

/// Process configuration, read once at startup. The signing secret and
/// the store connection string are never hard-coded.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Single origin allowed to make cross-origin requests with credentials.
    pub frontend_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            jwt_secret: std::env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .context("FRONTEND_ORIGIN must be set")?,
        })
    }
}
