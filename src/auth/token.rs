// src/auth/token.rs

//! Bearer token issuing and verification
//!
//! Tokens are HMAC-signed JWTs carrying the user id in the subject
//! claim. Verification trusts the token alone; there is no session
//! table or revocation list to consult.

use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per JWT convention
    pub sub: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a single HMAC secret
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer from a shared secret and token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for a user id
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Token(format!("Failed to sign token: {e}")))
    }

    /// Verify a token and return the user id it was issued for
    ///
    /// Malformed, expired, and wrongly-signed tokens all come back as
    /// `Unauthorized`; callers never learn which check failed.
    pub fn verify(&self, token: &str) -> Result<i64> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| Error::Unauthorized("Invalid or expired token".to_string()))?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| Error::Unauthorized("Invalid or expired token".to_string()))
    }
}
