//! # api-adapters
//!
//! The HTTP surface of the admin panel: the JSON admin API, the
//! server-rendered dashboard and the public site shell.
//!
//! Views compile unconditionally; the axum router lives behind `web-axum`.

pub mod views;

#[cfg(feature = "web-axum")]
pub mod web;

#[cfg(feature = "web-axum")]
pub use web::{router, AppState, CookiePolicy, SESSION_COOKIE};
