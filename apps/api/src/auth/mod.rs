//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs issued by the sign-up/login service, carrying the
//! account id. A request is authenticated only if the account still exists
//! and has verified its email.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Account;
use crate::state::AppState;

pub const NO_TOKEN: &str = "Access Denied! No token provided.";
pub const BAD_FORMAT: &str = "Access Denied! Invalid token format.";
pub const EXPIRED: &str = "Token has expired. Please log in again.";
pub const INVALID: &str = "Invalid token. Please log in again.";
pub const UNKNOWN_ACCOUNT: &str = "User no longer exists.";
pub const UNVERIFIED: &str = "Please verify your email first.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub exp: usize,
}

/// Pulls the token out of an `Authorization` header value. Both
/// `Bearer <token>` and a bare token are accepted.
fn bearer_token(header: &str) -> Result<&str, AppError> {
    let header = header.trim();
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AppError::Unauthorized(BAD_FORMAT.to_string()));
    }
    Ok(token)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::Unauthorized(EXPIRED.to_string()),
            _ => AppError::Unauthorized(INVALID.to_string()),
        })
}

/// The verified account behind a request.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub account: Account,
}

impl AuthedUser {
    /// Rejects with 403 unless the token's account owns `email`.
    pub fn ensure_owner(&self, email: &str, message: &str) -> Result<(), AppError> {
        if self.account.email != email {
            warn!(
                user_id = %self.account.id,
                requested_email = %email,
                "account mismatch"
            );
            return Err(AppError::Forbidden(message.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized(NO_TOKEN.to_string()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized(BAD_FORMAT.to_string()))?;

        let token = bearer_token(header)?;
        let claims = decode_token(&state.config.jwt_secret, token).map_err(|e| {
            warn!(error = %e, "rejected token");
            e
        })?;

        let account = state
            .accounts
            .find_by_id(claims.id)
            .await?
            .ok_or_else(|| AppError::Unauthorized(UNKNOWN_ACCOUNT.to_string()))?;

        if !account.is_verified {
            warn!(user_id = %account.id, "unverified account");
            return Err(AppError::Unauthorized(UNVERIFIED.to_string()));
        }

        Ok(AuthedUser { account })
    }
}

/// Signs a token the way the login service does.
#[cfg(test)]
pub(crate) fn issue_token(secret: &str, id: Uuid, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let exp = (chrono::Utc::now().timestamp() + ttl_secs).max(0) as usize;
    encode(
        &Header::new(Algorithm::HS256),
        &Claims { id, exp },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
