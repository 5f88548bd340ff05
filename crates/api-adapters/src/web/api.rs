//! The JSON admin API under `/api`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use domains::{
    Article, ArticleDraft, DomainError, Persona, PersonaDraft, SessionIdentity, Settings,
    SettingsDraft,
};
use serde::Serialize;
use services::SignedSession;
use tracing::info;
use uuid::Uuid;

use super::error::ApiError;
use super::session::{cleared_session_cookie, session_cookie, AdminSession};
use super::state::AppState;
use crate::views::Credentials;

type ApiResult<T> = Result<T, ApiError>;

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(session))
        .route("/api/admin/articles", get(list_articles).post(create_article))
        .route(
            "/api/admin/article/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/api/admin/personas", get(list_personas).post(create_persona))
        .route(
            "/api/admin/persona/{id}",
            get(get_persona).put(update_persona).delete(deactivate_persona),
        )
        .route("/api/admin/settings", get(get_settings).put(update_settings))
}

/// Ids that do not parse cannot exist.
pub(super) fn parse_id(entity: &str, raw: &str) -> Result<Uuid, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::not_found(entity, raw))
}

// ─── Auth ───────────────────────────────────────────────────────────────────

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<SignedSession>)> {
    let Json(credentials) = payload?;
    let session = state
        .auth
        .sign_in(&credentials.email, &credentials.password)
        .await?;

    let jar = jar.add(session_cookie(session.token.clone(), state.cookies));
    Ok((jar, Json(session)))
}

async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.remove(cleared_session_cookie()), StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
struct SessionView {
    admin: SessionIdentity,
}

async fn session(AdminSession(admin): AdminSession) -> Json<SessionView> {
    Json(SessionView { admin })
}

// ─── Articles ───────────────────────────────────────────────────────────────

async fn list_articles(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> ApiResult<Json<Vec<Article>>> {
    Ok(Json(state.articles.list().await?))
}

async fn create_article(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    payload: Result<Json<ArticleDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    let Json(draft) = payload?;
    let article = state.articles.create(draft).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Article>> {
    let id = parse_id("Article", &id)?;
    Ok(Json(state.articles.get(id).await?))
}

async fn update_article(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<ArticleDraft>, JsonRejection>,
) -> ApiResult<Json<Article>> {
    let id = parse_id("Article", &id)?;
    let Json(draft) = payload?;
    Ok(Json(state.articles.update(id, draft).await?))
}

async fn delete_article(
    State(state): State<Arc<AppState>>,
    AdminSession(admin): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id("Article", &id)?;
    state.articles.delete(id).await?;
    info!(article_id = %id, admin_id = %admin.id, "article deleted via api");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Personas ───────────────────────────────────────────────────────────────

async fn list_personas(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> ApiResult<Json<Vec<Persona>>> {
    Ok(Json(state.personas.list().await?))
}

async fn create_persona(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    payload: Result<Json<PersonaDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Persona>)> {
    let Json(draft) = payload?;
    let persona = state.personas.create(draft).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

async fn get_persona(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Persona>> {
    let id = parse_id("Persona", &id)?;
    Ok(Json(state.personas.get(id).await?))
}

async fn update_persona(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<PersonaDraft>, JsonRejection>,
) -> ApiResult<Json<Persona>> {
    let id = parse_id("Persona", &id)?;
    let Json(draft) = payload?;
    Ok(Json(state.personas.update(id, draft).await?))
}

async fn deactivate_persona(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Persona>> {
    let id = parse_id("Persona", &id)?;
    Ok(Json(state.personas.deactivate(id).await?))
}

// ─── Settings ───────────────────────────────────────────────────────────────

async fn get_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings.get().await?))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    payload: Result<Json<SettingsDraft>, JsonRejection>,
) -> ApiResult<Json<Settings>> {
    let Json(draft) = payload?;
    Ok(Json(state.settings.update(draft).await?))
}
