use axum::http::{Method, StatusCode};
use integration_tests::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_created_article_is_listed_with_author() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let persona = app.create_persona(&token, "Kit Marlowe").await;
    let persona_id = persona["id"].as_str().unwrap();

    let article = app
        .create_article(&token, persona_id, "Robots Unionise", true)
        .await;
    assert_eq!(article["personaName"], "Kit Marlowe");
    assert_eq!(article["style"], "analysis");
    assert!(article["publishedAt"].is_string());

    let listed = app.get("/api/admin/articles", Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let listed = listed.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], article["id"]);

    let persona = app
        .get(&format!("/api/admin/persona/{persona_id}"), Some(&token))
        .await
        .json();
    assert_eq!(persona["articleCount"], 1);
}

#[tokio::test]
async fn test_article_requires_valid_persona() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let cases = [
        json!({ "title": "T", "body": "B" }),
        json!({ "title": "T", "body": "B", "personaId": "" }),
        json!({ "title": "T", "body": "B", "personaId": uuid::Uuid::new_v4() }),
    ];
    for body in cases {
        let response = app
            .send_json(Method::POST, "/api/admin/articles", Some(&token), Some(body.clone()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
    }

    let listed = app.get("/api/admin/articles", Some(&token)).await.json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_inactive_persona_cannot_author_new_articles() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let persona = app.create_persona(&token, "Retired Hack").await;
    let persona_id = persona["id"].as_str().unwrap();
    app.send_json(
        Method::DELETE,
        &format!("/api/admin/persona/{persona_id}"),
        Some(&token),
        None,
    )
    .await;

    let response = app
        .send_json(
            Method::POST,
            "/api/admin/articles",
            Some(&token),
            Some(json!({ "title": "T", "body": "B", "personaId": persona_id })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].as_str().unwrap().contains("inactive"));
}

#[tokio::test]
async fn test_blank_excerpt_is_generated_from_body() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let persona = app.create_persona(&token, "Wordy").await;
    let body = "word ".repeat(100);

    let response = app
        .send_json(
            Method::POST,
            "/api/admin/articles",
            Some(&token),
            Some(json!({
                "title": "Long",
                "body": body,
                "excerpt": "  ",
                "personaId": persona["id"],
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let excerpt = response.json()["excerpt"].as_str().unwrap().to_string();
    assert!(excerpt.ends_with("..."));
    assert!(excerpt.chars().count() <= 203);
    assert!(excerpt.starts_with("word word"));
}

#[tokio::test]
async fn test_update_toggles_publication() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let persona = app.create_persona(&token, "Editor").await;
    let article = app
        .create_article(&token, persona["id"].as_str().unwrap(), "Draft Piece", false)
        .await;
    assert!(article["publishedAt"].is_null());
    let uri = format!("/api/admin/article/{}", article["id"].as_str().unwrap());

    let published = app
        .send_json(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({
                "title": "Final Piece",
                "body": "Now with facts.",
                "personaId": persona["id"],
                "style": "commentary",
                "isPublic": true,
            })),
        )
        .await;
    assert_eq!(published.status, StatusCode::OK);
    let published = published.json();
    assert_eq!(published["title"], "Final Piece");
    assert_eq!(published["style"], "commentary");
    assert!(published["publishedAt"].is_string());
    assert_eq!(published["createdAt"], article["createdAt"]);

    let fetched = app.get(&uri, Some(&token)).await.json();
    assert_eq!(fetched["publishedAt"], published["publishedAt"]);
}

#[tokio::test]
async fn test_delete_removes_article() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let persona = app.create_persona(&token, "Temp").await;
    let persona_id = persona["id"].as_str().unwrap();
    let doomed = app.create_article(&token, persona_id, "Doomed", true).await;
    app.create_article(&token, persona_id, "Survivor", true).await;
    let uri = format!("/api/admin/article/{}", doomed["id"].as_str().unwrap());

    let deleted = app.send_json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let listed = app.get("/api/admin/articles", Some(&token)).await.json();
    let titles: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Survivor"]);

    assert_eq!(app.get(&uri, Some(&token)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.send_json(Method::DELETE, &uri, Some(&token), None).await.status,
        StatusCode::NOT_FOUND
    );
}
