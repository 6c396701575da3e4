//! Stateless session tokens.
//!
//! A session is an HMAC-signed JWT carrying the user's id and username
//! plus issued-at/expiry timestamps. Nothing is persisted server-side:
//! possession of a valid, unexpired token is the sole proof of
//! authentication, and logout is purely client-side cookie clearing.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// Sign a session token for the given identity, valid for `ttl_seconds`.
pub fn issue(
    secret: &str,
    user_id: &str,
    username: &str,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now.saturating_add(ttl_seconds),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded claims.
///
/// Bad signatures, expired tokens, and malformed payloads are all
/// collapsed into `None` so callers cannot tell them apart and no
/// oracle leaks to the client.
#[must_use]
pub fn verify(secret: &str, token: &str) -> Option<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .ok()
}
