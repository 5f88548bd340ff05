//! # services
//!
//! Use-cases of the admin panel. Each service owns the ports it needs as
//! `Arc<dyn Port>` so the binary decides which adapters back them.

pub mod articles;
pub mod auth;
pub mod personas;
pub mod settings;
mod validation;

pub use articles::{generate_excerpt, ArticleService};
pub use auth::{AdminAccounts, AuthService, SignedSession};
pub use personas::PersonaService;
pub use settings::SettingsService;
