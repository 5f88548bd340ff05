//! The public site shell.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use domains::DomainError;

use super::api::parse_id;
use super::error::PageError;
use super::state::AppState;
use crate::views::{render, ArticlePage, HomePage, SiteChrome};

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/articles/{id}", get(article))
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let settings = state.settings.get().await?;
    let articles = if settings.is_public {
        state.articles.list_public().await?
    } else {
        Vec::new()
    };

    let page = HomePage {
        chrome: SiteChrome::new(&settings),
        is_public: settings.is_public,
        articles,
    };
    Ok(Html(render(&page)?))
}

async fn article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_id("Article", &id)?;
    let settings = state.settings.get().await?;
    if !settings.is_public {
        return Err(DomainError::not_found("Article", id).into());
    }

    let article = state.articles.get_public(id).await?;
    Ok(Html(render(&ArticlePage::new(&settings, article))?))
}
