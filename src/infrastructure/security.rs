use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

// Argon2 parameters for 50-150ms target latency
const ARGON2_M_COST: u32 = 19456; // 19 MB
const ARGON2_T_COST: u32 = 2; // 2 iterations
const ARGON2_P_COST: u32 = 1; // 1 parallelism

/// Session lifetime. Tokens cannot be revoked before this elapses.
const TOKEN_TTL_SECS: usize = 2 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32, // user id
    username: String,
    exp: usize,
    iat: usize,
}

/// Identity asserted by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: i32,
    pub username: String,
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, None)
            .map_err(argon2::password_hash::Error::from)?,
    );

    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, None)
            .map_err(argon2::password_hash::Error::from)?,
    );

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

pub fn generate_token(
    user_id: i32,
    username: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Verifies signature and expiry. Every failure mode (malformed payload,
/// wrong signature, elapsed expiry) surfaces as the same error; callers
/// must not distinguish reasons.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 60; // 60 seconds leeway

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(TokenClaims {
        user_id: token_data.claims.sub,
        username: token_data.claims.username,
    })
}
