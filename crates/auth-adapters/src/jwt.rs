//! HS256 session tokens.
//!
//! Sessions are stateless: the token carries the admin identity and an expiry,
//! and nothing is stored server-side.

use chrono::{Duration, Utc};
use domains::{DomainError, Result, SessionIdentity, SessionTokens};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    email: String,
    name: String,
    iat: i64,
    exp: i64,
}

pub struct JwtSessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtSessionTokens {
    /// Fails when `ttl_secs` does not fit a timestamp offset.
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Result<Self> {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                DomainError::Internal(format!("session ttl of {ttl_secs}s is out of range"))
            })?;

        let key = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
            ttl,
        })
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, identity: &SessionIdentity) -> Result<String> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| DomainError::Internal("session expiry overflows".to_string()))?;
        let claims = Claims {
            sub: identity.id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::Internal(format!("failed to sign session token: {e}")))
    }

    fn verify(&self, token: &str) -> Result<SessionIdentity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "session token rejected");
            DomainError::Unauthorized("invalid or expired session".to_string())
        })?;

        Ok(SessionIdentity {
            id: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
        })
    }
}
