//! # seed
//!
//! Provisions admin accounts out-of-band and, on request, a few demo personas
//! and articles. Reads the database location from the server configuration.

use std::sync::Arc;

use anyhow::{bail, Context};
use auth_adapters::Argon2PasswordHasher;
use clap::Parser;
use configs::AppConfig;
use domains::{ArticleDraft, ArticleStyle, DomainError, PersonaDraft, PersonaRole};
use services::{AdminAccounts, ArticleService, PersonaService};
use storage_adapters::SqliteStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Provision admin accounts and demo content")]
struct Args {
    /// Admin sign-in email
    #[arg(long, env = "INTELLIGENCER_ADMIN_EMAIL")]
    email: String,

    /// Display name shown in the dashboard
    #[arg(long, env = "INTELLIGENCER_ADMIN_NAME", default_value = "Admin")]
    name: String,

    /// Admin password (at least 8 characters)
    #[arg(long, env = "INTELLIGENCER_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Overrides `database.url` from the configuration
    #[arg(long)]
    database_url: Option<String>,

    /// Also create demo personas and articles
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let url = args.database_url.clone().unwrap_or(config.database.url);
    let store = Arc::new(
        SqliteStore::connect(&url, 1)
            .await
            .with_context(|| format!("failed to open database {url}"))?,
    );

    let accounts = AdminAccounts::new(store.clone(), Arc::new(Argon2PasswordHasher::new()));
    match accounts.provision(&args.email, &args.name, &args.password).await {
        Ok(admin) => info!(admin_id = %admin.id, email = %admin.email, "admin provisioned"),
        Err(DomainError::Conflict(msg)) => warn!(reason = %msg, "admin not created"),
        Err(e) => bail!("failed to provision admin: {e}"),
    }

    if args.demo {
        let personas = PersonaService::new(store.clone());
        let articles = ArticleService::new(store.clone(), store);
        seed_demo(&personas, &articles).await.context("failed to create demo content")?;
    }

    Ok(())
}

async fn seed_demo(personas: &PersonaService, articles: &ArticleService) -> Result<(), DomainError> {
    if !personas.list().await?.is_empty() {
        warn!("personas already exist, skipping demo content");
        return Ok(());
    }

    let reporter = personas
        .create(PersonaDraft {
            name: "Ada Byte".into(),
            bio: "Covers the chip industry from the fab floor to the earnings call.".into(),
            role: PersonaRole::Reporter,
            display_order: 0,
            ..PersonaDraft::default()
        })
        .await?;
    let commentator = personas
        .create(PersonaDraft {
            name: "Marvin Quill".into(),
            bio: "Has opinions about every product launch, most of them gloomy.".into(),
            role: PersonaRole::Commentator,
            display_order: 1,
            ..PersonaDraft::default()
        })
        .await?;

    articles
        .create(ArticleDraft {
            title: "Foundries Race to Keep Up With Demand".into(),
            body: "Chipmakers reported record orders this quarter.\n\nCapacity, not demand, is now the constraint, and new fabs are years away.".into(),
            persona_id: Some(reporter.id),
            category: Some("technology".into()),
            style: ArticleStyle::Analysis,
            ..ArticleDraft::default()
        })
        .await?;
    articles
        .create(ArticleDraft {
            title: "Another Smart Fridge Nobody Asked For".into(),
            body: "It tweets when you run out of milk. It also runs out of milk.".into(),
            persona_id: Some(commentator.id),
            style: ArticleStyle::Satire,
            is_public: false,
            ..ArticleDraft::default()
        })
        .await?;

    info!("demo personas and articles created");
    Ok(())
}
