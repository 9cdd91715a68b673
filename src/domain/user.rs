use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    // Column exists for the (unimplemented) password-reset flow.
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// What the profile route exposes: never the hash, never the reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub email: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Profile {
            username: user.username,
            email: user.email,
        }
    }
}
