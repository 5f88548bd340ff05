//! Maps `DomainError` onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use domains::{DomainError, INVALID_CREDENTIALS};
use serde_json::json;
use tracing::error;

use crate::views::{render, ErrorPage};

/// Error type of the JSON API. Serialised as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::ValidationError(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            err @ DomainError::NotFound(..) => (StatusCode::NOT_FOUND, err.to_string()),
            DomainError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            DomainError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string())
            }
            DomainError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            DomainError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Error type of the HTML pages. Session failures send the visitor to the
/// sign-in page; everything else renders the error page.
#[derive(Debug)]
pub struct PageError(pub DomainError);

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self.0 {
            DomainError::Unauthorized(_) | DomainError::InvalidCredentials => {
                return Redirect::to("/admin/login").into_response();
            }
            DomainError::NotFound(..) => (
                StatusCode::NOT_FOUND,
                "Not found",
                "The page you are looking for does not exist.".to_string(),
            ),
            DomainError::ValidationError(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg),
            DomainError::Internal(msg) => {
                error!(error = %msg, "page request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "Please try again later.".to_string(),
                )
            }
        };

        let page = ErrorPage {
            title: title.to_string(),
            message,
        };
        match render(&page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, title).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::not_found("Article", 1), StatusCode::NOT_FOUND),
            (DomainError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_page_error_redirects_on_missing_session() {
        let response = PageError(DomainError::Unauthorized("no session".into())).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
    }
}
