//! # Intelligencer server
//!
//! Assembles the adapters chosen at compile time and serves the admin panel,
//! its JSON API and the public site.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState, CookiePolicy};
use auth_adapters::{Argon2PasswordHasher, JwtSessionTokens};
use configs::{AppConfig, LogConfig};
use services::{ArticleService, AuthService, PersonaService, SettingsService};
use storage_adapters::SqliteStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);
    config.validate().context("configuration is not usable")?;

    // 1. Storage
    let store = Arc::new(
        SqliteStore::connect(&config.database.url, config.database.max_connections)
            .await
            .with_context(|| format!("failed to open database {}", config.database.url))?,
    );

    // 2. Auth
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(
        JwtSessionTokens::new(&config.auth.jwt_secret, config.auth.session_ttl_secs)
            .context("invalid session settings")?,
    );

    // 3. Services
    let state = Arc::new(AppState {
        auth: AuthService::new(store.clone(), hasher, tokens),
        personas: PersonaService::new(store.clone()),
        articles: ArticleService::new(store.clone(), store.clone()),
        settings: SettingsService::new(store),
        cookies: CookiePolicy {
            secure: config.auth.secure_cookies,
        },
    });

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(address = %address, "intelligencer listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("intelligencer stopped");
    Ok(())
}

/// `RUST_LOG` overrides the configured filter.
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
