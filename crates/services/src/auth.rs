//! Admin authentication and provisioning.
//!
//! Sign-in looks the admin up by email and compares the password against the
//! stored Argon2 hash. Every failure collapses into
//! [`DomainError::InvalidCredentials`] so callers cannot tell an unknown email
//! from a wrong password.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    Admin, AdminRepository, DomainError, PasswordHasher, Result, SessionIdentity, SessionTokens,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::validation::require;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A freshly issued token together with the identity it encodes.
#[derive(Debug, Clone, Serialize)]
pub struct SignedSession {
    pub token: String,
    #[serde(rename = "admin")]
    pub identity: SessionIdentity,
}

#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn SessionTokens>,
}

impl AuthService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn SessionTokens>,
    ) -> Self {
        Self {
            admins,
            hasher,
            tokens,
        }
    }

    /// Checks the credentials. Returns `None` on any mismatch, including blank input.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<SessionIdentity>> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let Some(admin) = self.admins.find_by_email(&email).await? else {
            debug!("sign-in attempt for unknown email");
            return Ok(None);
        };

        if !self.hasher.verify(password, &admin.password_hash) {
            debug!(admin_id = %admin.id, "sign-in attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(SessionIdentity::from(&admin)))
    }

    /// Authenticates and issues a session token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedSession> {
        match self.authenticate(email, password).await? {
            Some(identity) => {
                let token = self.tokens.issue(&identity)?;
                info!(admin_id = %identity.id, "admin signed in");
                Ok(SignedSession { token, identity })
            }
            None => {
                warn!("admin sign-in rejected");
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    pub fn verify_session(&self, token: &str) -> Result<SessionIdentity> {
        self.tokens.verify(token)
    }
}

/// Out-of-band admin provisioning, used by the `seed` binary.
#[derive(Clone)]
pub struct AdminAccounts {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AdminAccounts {
    pub fn new(admins: Arc<dyn AdminRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { admins, hasher }
    }

    pub async fn provision(&self, email: &str, name: &str, password: &str) -> Result<Admin> {
        let email = normalize_email(&require("email", email)?);
        let name = require("name", name)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::ValidationError(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.admins.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!("an admin with email {email} already exists")));
        }

        let admin = Admin {
            id: Uuid::new_v4(),
            email,
            password_hash: self.hasher.hash(password)?,
            name,
            created_at: Utc::now(),
        };
        self.admins.insert(&admin).await?;

        info!(admin_id = %admin.id, email = %admin.email, "admin provisioned");
        Ok(admin)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
