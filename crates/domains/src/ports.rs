//! # Ports
//!
//! Every adapter must implement these traits to be wired into the binary.
//! Stores report infrastructure failures as `DomainError::Internal`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Admin, Article, Persona, SessionIdentity, Settings};

/// Credential store contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>>;
    /// Fails with `Conflict` when the email is already taken.
    async fn insert(&self, admin: &Admin) -> Result<()>;
}

/// Persistence contract for personas.
///
/// Reads fill in `article_count`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Every persona, active or not, ordered by display order then name.
    async fn list(&self) -> Result<Vec<Persona>>;
    async fn find(&self, id: Uuid) -> Result<Option<Persona>>;
    async fn insert(&self, persona: &Persona) -> Result<()>;
    /// Returns `false` when no row matched.
    async fn update(&self, persona: &Persona) -> Result<bool>;
    /// Returns `false` when no row matched.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<bool>;
}

/// Persistence contract for articles.
///
/// Reads fill in `persona_name`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<Article>>;
    /// Public articles only, most recently published first.
    async fn list_public(&self) -> Result<Vec<Article>>;
    async fn find(&self, id: Uuid) -> Result<Option<Article>>;
    async fn insert(&self, article: &Article) -> Result<()>;
    async fn update(&self, article: &Article) -> Result<bool>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// The settings singleton.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<Option<Settings>>;
    /// Stores `initial` unless a row already exists, then returns the stored
    /// row. Atomic: concurrent callers all see the same row.
    async fn load_or_insert(&self, initial: &Settings) -> Result<Settings>;
    /// Insert-or-replace of the single row.
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// Salted password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    /// Constant-time comparison. Malformed hashes simply fail to verify.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Stateless signed session tokens.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionTokens: Send + Sync {
    fn issue(&self, identity: &SessionIdentity) -> Result<String>;
    /// Fails with `Unauthorized` for expired or tampered tokens.
    fn verify(&self, token: &str) -> Result<SessionIdentity>;
}
