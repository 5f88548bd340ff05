//! Shared harness: the full router over the in-memory store, with real Argon2
//! hashing and real JWT sessions, driven through `tower::ServiceExt::oneshot`.
#![cfg(feature = "web-axum")]

use std::sync::Arc;

use api_adapters::{router, AppState, CookiePolicy, SESSION_COOKIE};
use auth_adapters::{Argon2PasswordHasher, JwtSessionTokens};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use services::{AdminAccounts, ArticleService, AuthService, PersonaService, SettingsService};
use storage_adapters::MemoryStore;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const ADMIN_EMAIL: &str = "editor@intelligencer.test";
pub const ADMIN_PASSWORD: &str = "correct horse battery";
pub const ADMIN_NAME: &str = "Night Editor";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| {
            panic!("response is not JSON ({e}): {}", self.body);
        })
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `Set-Cookie` header for the session cookie, if any.
    pub fn session_set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
            .map(String::from)
    }
}

impl TestApp {
    /// A fresh application with one provisioned admin.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::new());
        let tokens = Arc::new(JwtSessionTokens::new(
            &SecretString::from(TEST_SECRET.to_string()),
            3600,
        )
        .expect("valid session ttl"));

        AdminAccounts::new(store.clone(), hasher.clone())
            .provision(ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD)
            .await
            .expect("provision admin");

        let state = Arc::new(AppState {
            auth: AuthService::new(store.clone(), hasher, tokens),
            personas: PersonaService::new(store.clone()),
            articles: ArticleService::new(store.clone(), store.clone()),
            settings: SettingsService::new(store.clone()),
            cookies: CookiePolicy::default(),
        });

        Self {
            router: router(state),
            store,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.request(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send_json(Method::GET, uri, token, None).await
    }

    /// Browser-style request: session carried by the cookie.
    pub async fn page(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        self.request(builder.body(Body::empty()).expect("valid request"))
            .await
    }

    /// Browser-style form post.
    pub async fn post_form(&self, uri: &str, token: Option<&str>, form: &str) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        self.request(builder.body(Body::from(form.to_string())).expect("valid request"))
            .await
    }

    /// Signs in through the API and returns the session token.
    pub async fn login(&self) -> String {
        let response = self
            .send_json(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.json()["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub async fn create_persona(&self, token: &str, name: &str) -> Value {
        let response = self
            .send_json(
                Method::POST,
                "/api/admin/personas",
                Some(token),
                Some(json!({
                    "name": name,
                    "bio": format!("{name} files stories on deadline."),
                    "role": "reporter",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.json()
    }

    pub async fn create_article(&self, token: &str, persona_id: &str, title: &str, public: bool) -> Value {
        let response = self
            .send_json(
                Method::POST,
                "/api/admin/articles",
                Some(token),
                Some(json!({
                    "title": title,
                    "body": format!("{title}. The full story follows."),
                    "personaId": persona_id,
                    "isPublic": public,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.json()
    }
}
