//! # configs
//!
//! Layered application configuration:
//! built-in defaults → `config/default.toml` → `config/local.toml` →
//! `INTELLIGENCER__SECTION__KEY` environment variables (a `.env` file is read
//! first).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "INTELLIGENCER";

/// HS256 keys shorter than the hash output weaken the signature.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// One year.
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://data/intelligencer.db`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HMAC key for session tokens
    pub jwt_secret: SecretString,
    pub session_ttl_secs: u64,
    /// Adds `Secure` to the session cookie; enable behind HTTPS
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl AppConfig {
    /// Loads every layer. Does not validate; see [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is normal outside development.
        dotenvy::dotenv().ok();

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// The built-in defaults layer.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.url", "sqlite://data/intelligencer.db")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.session_ttl_secs", 86_400_i64)?
            .set_default("auth.secure_cookies", false)?
            .set_default("log.filter", "info,tower_http=info,sqlx=warn")?
            .set_default("log.json", false)?)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Checks required for serving traffic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret_len = self.auth.jwt_secret.expose_secret().len();
        if secret_len < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes (got {secret_len}); \
                 set {ENV_PREFIX}__AUTH__JWT_SECRET"
            )));
        }
        if !(1..=MAX_SESSION_TTL_SECS).contains(&self.auth.session_ttl_secs) {
            return Err(ConfigError::Invalid(format!(
                "auth.session_ttl_secs must be between 1 and {MAX_SESSION_TTL_SECS}"
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be positive".into(),
            ));
        }
        Ok(())
    }
}
