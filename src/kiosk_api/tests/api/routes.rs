use serde_json::Value;

use crate::helpers::{ALLOWED_ORIGIN, TestApp, registration_body};

#[tokio::test]
async fn health_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn register_login_use_logout() {
    let app = TestApp::new().await;

    let user_id = app.register("1234567890").await;
    let token = app.login("1234567890").await;
    let profile = format!("/users/{user_id}");

    let response = app.get(&profile, Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], user_id);
    assert_eq!(body["countryCode"], "+1");

    let response = app.post_logout(Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "Logged out");

    let response = app.get(&profile, Some(&token)).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn register_twice_conflicts() {
    let app = TestApp::new().await;
    app.register("1234567890").await;

    let response = app.post_register(&registration_body("1234567890")).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn register_hides_password() {
    let app = TestApp::new().await;

    let response = app.post_register(&registration_body("1234567890")).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "account created!");
    let user = body["user"].as_object().unwrap();
    assert!(user.keys().all(|key| !key.to_lowercase().contains("password")));
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let app = TestApp::new().await;

    let allowed = app
        .http_client
        .get(app.url("/health"))
        .header("Origin", ALLOWED_ORIGIN)
        .send()
        .await
        .unwrap();
    let other = app
        .http_client
        .get(app.url("/health"))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    assert!(!other.headers().contains_key("access-control-allow-origin"));
}
