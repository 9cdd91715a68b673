use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Internal error: {0}")]
    Internal(String),
}
