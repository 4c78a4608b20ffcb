//! JWT issuance and verification
//!
//! Tokens are HS256-signed and carry a typed claim set. Verification pins the
//! algorithm so a token re-signed under a different scheme never validates.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;

use super::models::Claims;
use crate::common::ApiError;

/// Token lifetime: 24 hours from issuance
const TOKEN_TTL_HOURS: i64 = 24;

/// Issue a signed token asserting the given user id
pub fn issue(user_id: i64, secret: &str) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        authorized: true,
        user: user_id,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        warn!(error = %e, user_id = user_id, "JWT encoding failed");
        ApiError::InternalServer("jwt error".to_string())
    })
}

/// Verify a token and return the embedded user id
///
/// Rejects bad signatures, non-HS256 algorithms and expired tokens with one
/// undifferentiated error.
pub fn verify(token: &str, secret: &str) -> Result<i64, ApiError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        warn!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("Invalid or expired JWT token".to_string())
    })?;

    Ok(decoded.claims.user)
}
