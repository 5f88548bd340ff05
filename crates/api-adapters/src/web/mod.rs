//! # Axum adapter
//!
//! One router serves the JSON admin API, the admin pages and the public site.

mod admin;
mod api;
mod error;
mod public;
mod session;
mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, PageError};
pub use session::{AdminSession, PageSession, SESSION_COOKIE};
pub use state::{AppState, CookiePolicy};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::routes())
        .merge(admin::routes())
        .merge(public::routes())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
