//! The server-rendered admin panel under `/admin`.
//!
//! Every mutation is a form post answered with a redirect back to its tab
//! (post/redirect/get). A validation failure re-renders the tab instead, with
//! the submitted values and the reason.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::CookieJar;
use domains::{DomainError, SessionIdentity};
use tracing::{info, warn};

use super::api::parse_id;
use super::error::PageError;
use super::session::{cleared_session_cookie, identify, session_cookie, PageSession};
use super::state::AppState;
use crate::views::{
    render, ArticleForm, ArticlesPanel, Credentials, DashboardPage, DashboardQuery, LoginPage,
    PanelMode, PersonaForm, PersonasPanel, SettingsForm, SettingsPanel, Tab,
};

type PageResult = Result<Response, PageError>;

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(|| async { Redirect::to("/admin/dashboard") }))
        .route("/admin/login", get(login_page).post(login_submit))
        .route("/admin/logout", post(logout))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/dashboard/articles", post(create_article))
        .route("/admin/dashboard/articles/{id}", post(update_article))
        .route("/admin/dashboard/articles/{id}/delete", post(delete_article))
        .route("/admin/dashboard/personas", post(create_persona))
        .route("/admin/dashboard/personas/{id}", post(update_persona))
        .route("/admin/dashboard/personas/{id}/delete", post(deactivate_persona))
        .route("/admin/dashboard/settings", post(update_settings))
}

/// A form the service refused, to be shown again.
enum Rejected {
    Article(ArticleForm, String),
    Persona(PersonaForm, String),
    Settings(SettingsForm, String),
}

// ─── Sign-in ────────────────────────────────────────────────────────────────

async fn login_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> PageResult {
    if identify(&headers, &state).is_ok() {
        return Ok(Redirect::to("/admin/dashboard").into_response());
    }
    let page = LoginPage {
        error: None,
        email: String::new(),
    };
    Ok(Html(render(&page)?).into_response())
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> PageResult {
    match state.auth.sign_in(&credentials.email, &credentials.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token, state.cookies));
            Ok((jar, Redirect::to("/admin/dashboard")).into_response())
        }
        Err(DomainError::InvalidCredentials) => {
            let page = LoginPage {
                error: Some(DomainError::InvalidCredentials.to_string()),
                email: credentials.email,
            };
            Ok((StatusCode::UNAUTHORIZED, Html(render(&page)?)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn logout(jar: CookieJar) -> Response {
    (jar.remove(cleared_session_cookie()), Redirect::to("/admin/login")).into_response()
}

// ─── Dashboard ──────────────────────────────────────────────────────────────

async fn dashboard(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Query(query): Query<DashboardQuery>,
) -> PageResult {
    let html = dashboard_html(&state, &admin, query.tab(), query.mode(), None, query.saved()).await?;
    Ok(Html(html).into_response())
}

async fn dashboard_html(
    state: &AppState,
    admin: &SessionIdentity,
    tab: Tab,
    mode: PanelMode,
    rejected: Option<Rejected>,
    saved: bool,
) -> Result<String, DomainError> {
    let panel = match tab {
        Tab::Articles => {
            let rejected = match rejected {
                Some(Rejected::Article(form, error)) => Some((form, error)),
                _ => None,
            };
            let articles = state.articles.list().await?;
            let personas = state.personas.list().await?;
            render(&ArticlesPanel::build(articles, &personas, mode, rejected)?)?
        }
        Tab::Personas => {
            let rejected = match rejected {
                Some(Rejected::Persona(form, error)) => Some((form, error)),
                _ => None,
            };
            let personas = state.personas.list().await?;
            render(&PersonasPanel::build(personas, mode, rejected)?)?
        }
        Tab::Settings => {
            let rejected = match rejected {
                Some(Rejected::Settings(form, error)) => Some((form, error)),
                _ => None,
            };
            let settings = state.settings.get().await?;
            render(&SettingsPanel::build(&settings, rejected, saved))?
        }
    };

    render(&DashboardPage::new(admin, tab, panel))
}

/// Redirects on success; re-renders the tab with the form on a validation error.
async fn finish(
    state: &AppState,
    admin: &SessionIdentity,
    outcome: Result<(), DomainError>,
    success: String,
    tab: Tab,
    mode: PanelMode,
    rejected: impl FnOnce(String) -> Rejected,
) -> PageResult {
    match outcome {
        Ok(()) => Ok(Redirect::to(&success).into_response()),
        Err(DomainError::ValidationError(message)) => {
            warn!(tab = tab.as_str(), reason = %message, "form submission rejected");
            let html = dashboard_html(state, admin, tab, mode, Some(rejected(message)), false).await?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// ─── Articles ───────────────────────────────────────────────────────────────

async fn create_article(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Form(form): Form<ArticleForm>,
) -> PageResult {
    let outcome = match form.to_draft() {
        Ok(draft) => state.articles.create(draft).await.map(|_| ()),
        Err(err) => Err(err),
    };
    finish(
        &state,
        &admin,
        outcome,
        Tab::Articles.href(),
        Tab::Articles,
        PanelMode::Creating,
        |error| Rejected::Article(form, error),
    )
    .await
}

async fn update_article(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
    Form(form): Form<ArticleForm>,
) -> PageResult {
    let id = parse_id("Article", &id)?;
    let outcome = match form.to_draft() {
        Ok(draft) => state.articles.update(id, draft).await.map(|_| ()),
        Err(err) => Err(err),
    };
    finish(
        &state,
        &admin,
        outcome,
        Tab::Articles.href(),
        Tab::Articles,
        PanelMode::Editing(id),
        |error| Rejected::Article(form, error),
    )
    .await
}

async fn delete_article(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
) -> PageResult {
    let id = parse_id("Article", &id)?;
    state.articles.delete(id).await?;
    info!(article_id = %id, admin_id = %admin.id, "article deleted from dashboard");
    Ok(Redirect::to(&Tab::Articles.href()).into_response())
}

// ─── Personas ───────────────────────────────────────────────────────────────

async fn create_persona(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Form(form): Form<PersonaForm>,
) -> PageResult {
    let outcome = match form.to_draft(false) {
        Ok(draft) => state.personas.create(draft).await.map(|_| ()),
        Err(err) => Err(err),
    };
    finish(
        &state,
        &admin,
        outcome,
        Tab::Personas.href(),
        Tab::Personas,
        PanelMode::Creating,
        |error| Rejected::Persona(form, error),
    )
    .await
}

async fn update_persona(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
    Form(form): Form<PersonaForm>,
) -> PageResult {
    let id = parse_id("Persona", &id)?;
    let outcome = match form.to_draft(true) {
        Ok(draft) => state.personas.update(id, draft).await.map(|_| ()),
        Err(err) => Err(err),
    };
    finish(
        &state,
        &admin,
        outcome,
        Tab::Personas.href(),
        Tab::Personas,
        PanelMode::Editing(id),
        |error| Rejected::Persona(form, error),
    )
    .await
}

async fn deactivate_persona(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
) -> PageResult {
    let id = parse_id("Persona", &id)?;
    state.personas.deactivate(id).await?;
    info!(persona_id = %id, admin_id = %admin.id, "persona deactivated from dashboard");
    Ok(Redirect::to(&Tab::Personas.href()).into_response())
}

// ─── Settings ───────────────────────────────────────────────────────────────

async fn update_settings(
    State(state): State<Arc<AppState>>,
    PageSession(admin): PageSession,
    Form(form): Form<SettingsForm>,
) -> PageResult {
    let outcome = state.settings.update(form.to_draft()).await.map(|_| ());
    finish(
        &state,
        &admin,
        outcome,
        format!("{}&saved=1", Tab::Settings.href()),
        Tab::Settings,
        PanelMode::Idle,
        |error| Rejected::Settings(form, error),
    )
    .await
}
