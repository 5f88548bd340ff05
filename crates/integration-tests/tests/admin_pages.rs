use axum::http::StatusCode;
use integration_tests::{TestApp, ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD};

fn login_form(email: &str, password: &str) -> String {
    format!(
        "email={}&password={}",
        email.replace('@', "%40"),
        password.replace(' ', "+")
    )
}

#[tokio::test]
async fn test_dashboard_redirects_anonymous_visitors() {
    let app = TestApp::spawn().await;

    let response = app.page("/admin/dashboard", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/admin/login"));

    let forged = app.page("/admin/dashboard", Some("garbage")).await;
    assert_eq!(forged.location(), Some("/admin/login"));

    let post = app.post_form("/admin/dashboard/settings", None, "siteName=Hijacked").await;
    assert_eq!(post.location(), Some("/admin/login"));
}

#[tokio::test]
async fn test_form_sign_in_sets_cookie_and_redirects() {
    let app = TestApp::spawn().await;

    let page = app.page("/admin/login", None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Admin sign in"));

    let response = app
        .post_form("/admin/login", None, &login_form(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/admin/dashboard"));
    assert!(response.session_set_cookie().is_some());
}

#[tokio::test]
async fn test_failed_form_sign_in_shows_generic_error() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/admin/login", None, &login_form("ghost@intelligencer.test", "whatever"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid email or password"));
    assert!(response.body.contains("ghost@intelligencer.test"));
    assert!(response.session_set_cookie().is_none());
}

#[tokio::test]
async fn test_signed_in_admin_skips_login_page() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app.page("/admin/login", Some(&token)).await;
    assert_eq!(response.location(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_dashboard_tabs_render() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let articles = app.page("/admin/dashboard", Some(&token)).await;
    assert_eq!(articles.status, StatusCode::OK);
    assert!(articles.body.contains(ADMIN_NAME));
    assert!(articles.body.contains("Articles (0)"));
    assert!(articles.body.contains("Create a persona first before writing articles."));

    let personas = app.page("/admin/dashboard?tab=personas", Some(&token)).await;
    assert!(personas.body.contains("Personas (0)"));

    let settings = app.page("/admin/dashboard?tab=settings", Some(&token)).await;
    assert!(settings.body.contains("The Artificial Intelligencer"));
}

#[tokio::test]
async fn test_persona_lifecycle_through_forms() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let created = app
        .post_form(
            "/admin/dashboard/personas",
            Some(&token),
            "name=Lena+Ink&bio=Courts+and+crime&role=reporter&displayOrder=0&profileImageUrl=",
        )
        .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    assert_eq!(created.location(), Some("/admin/dashboard?tab=personas"));

    let listed = app.get("/api/admin/personas", Some(&token)).await.json();
    let id = listed[0]["id"].as_str().unwrap().to_string();
    assert_eq!(listed[0]["name"], "Lena Ink");

    let edit = app
        .page(&format!("/admin/dashboard?tab=personas&edit={id}"), Some(&token))
        .await;
    assert!(edit.body.contains("Edit Persona"));
    assert!(edit.body.contains("Courts and crime"));

    let deactivated = app
        .post_form(&format!("/admin/dashboard/personas/{id}/delete"), Some(&token), "")
        .await;
    assert_eq!(deactivated.status, StatusCode::SEE_OTHER);

    let panel = app.page("/admin/dashboard?tab=personas", Some(&token)).await;
    assert!(panel.body.contains("Inactive"));

    // The edit form posts the Active checkbox; ticking it reactivates.
    let reactivated = app
        .post_form(
            &format!("/admin/dashboard/personas/{id}"),
            Some(&token),
            "name=Lena+Ink&bio=Courts+and+crime&role=reporter&displayOrder=0&isActive=on",
        )
        .await;
    assert_eq!(reactivated.status, StatusCode::SEE_OTHER);
    let persona = app.get(&format!("/api/admin/persona/{id}"), Some(&token)).await.json();
    assert_eq!(persona["isActive"], true);
}

#[tokio::test]
async fn test_invalid_persona_form_is_rerendered() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .post_form(
            "/admin/dashboard/personas",
            Some(&token),
            "name=Half+Done&bio=&role=commentator&displayOrder=4",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("bio is required"));
    assert!(response.body.contains("Half Done"));
    assert!(response.body.contains("New Persona"));
}

#[tokio::test]
async fn test_article_lifecycle_through_forms() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let persona = app.create_persona(&token, "Ravi Quill").await;
    let persona_id = persona["id"].as_str().unwrap();

    let new_form = app.page("/admin/dashboard?tab=articles&new=1", Some(&token)).await;
    assert!(new_form.body.contains("New Article"));
    assert!(new_form.body.contains("Ravi Quill (reporter)"));

    // No isPublic field: the checkbox was left unticked.
    let created = app
        .post_form(
            "/admin/dashboard/articles",
            Some(&token),
            &format!("title=Quiet+Draft&body=Not+yet.&excerpt=&personaId={persona_id}&category=&style=satire"),
        )
        .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    assert_eq!(created.location(), Some("/admin/dashboard?tab=articles"));

    let listed = app.get("/api/admin/articles", Some(&token)).await.json();
    let article = &listed[0];
    assert_eq!(article["isPublic"], false);
    assert_eq!(article["style"], "satire");
    assert!(article["category"].is_null());
    let id = article["id"].as_str().unwrap().to_string();

    let panel = app.page("/admin/dashboard?tab=articles", Some(&token)).await;
    assert!(panel.body.contains("Quiet Draft"));
    assert!(panel.body.contains("Draft"));
    assert!(panel.body.contains("Delete this article permanently?"));

    let deleted = app
        .post_form(&format!("/admin/dashboard/articles/{id}/delete"), Some(&token), "")
        .await;
    assert_eq!(deleted.status, StatusCode::SEE_OTHER);
    let listed = app.get("/api/admin/articles", Some(&token)).await.json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_article_form_without_author_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    app.create_persona(&token, "Someone").await;

    let response = app
        .post_form(
            "/admin/dashboard/articles",
            Some(&token),
            "title=Orphan&body=Who+wrote+this%3F&personaId=&style=analysis&isPublic=on",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("personaId is required"));
    assert!(response.body.contains("Orphan"));
}

#[tokio::test]
async fn test_settings_form_saves() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .post_form(
            "/admin/dashboard/settings",
            Some(&token),
            "siteName=Synthetic+Times&tagline=",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/admin/dashboard?tab=settings&saved=1"));

    let settings = app.get("/api/admin/settings", Some(&token)).await.json();
    assert_eq!(settings["siteName"], "Synthetic Times");
    assert!(settings["tagline"].is_null());
    assert_eq!(settings["isPublic"], false);

    let page = app
        .page("/admin/dashboard?tab=settings&saved=1", Some(&token))
        .await;
    assert!(page.body.contains("Settings saved."));
}

#[tokio::test]
async fn test_editing_unknown_article_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .page(
            &format!("/admin/dashboard?tab=articles&edit={}", uuid::Uuid::new_v4()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_form_logout_redirects_to_login() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app.post_form("/admin/logout", Some(&token), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/admin/login"));
    assert!(response.session_set_cookie().unwrap().contains("Max-Age=0"));
}
