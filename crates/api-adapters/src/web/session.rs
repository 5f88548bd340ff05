//! Session extraction.
//!
//! The token is read from `Authorization: Bearer` first, then from the session
//! cookie set at sign-in.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domains::{DomainError, SessionIdentity};

use super::error::{ApiError, PageError};
use super::state::{AppState, CookiePolicy};

pub const SESSION_COOKIE: &str = "intelligencer_session";

/// A signed-in admin calling the JSON API. Rejects with `401`.
pub struct AdminSession(pub SessionIdentity);

/// A signed-in admin viewing a page. Rejects with a redirect to the sign-in page.
pub struct PageSession(pub SessionIdentity);

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(identify(&parts.headers, state)?))
    }
}

impl FromRequestParts<Arc<AppState>> for PageSession {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(identify(&parts.headers, state)?))
    }
}

pub(super) fn identify(headers: &HeaderMap, state: &AppState) -> Result<SessionIdentity, DomainError> {
    let token = session_token(headers)
        .ok_or_else(|| DomainError::Unauthorized("missing session token".into()))?;
    state.auth.verify_session(&token)
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

pub(super) fn session_cookie(token: String, policy: CookiePolicy) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(policy.secure)
        .build()
}

/// Matches the issued cookie's path so the browser drops it.
pub(super) fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
