use serde_json::Value;

use crate::helpers::{PASSWORD, TestApp, error_message, login_body};

#[tokio::test]
async fn login_returns_token_and_user_id() {
    let app = TestApp::new().await;
    let user_id = app.register("1234567890").await;

    let response = app.post_login(&login_body("1234567890", PASSWORD)).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Auth success");
    assert_eq!(body["userId"], user_id);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("1234567890").await;

    let wrong_password = app.post_login(&login_body("1234567890", "wrong")).await;
    let unknown_user = app.post_login(&login_body("5555555555", PASSWORD)).await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_user.status().as_u16(), 401);
    assert_eq!(
        error_message(wrong_password).await,
        error_message(unknown_user).await
    );
}

#[tokio::test]
async fn every_session_is_independent() {
    let app = TestApp::new().await;
    let user_id = app.register("1234567890").await;
    let first = app.login("1234567890").await;
    let second = app.login("1234567890").await;
    assert_ne!(first, second);

    app.post_logout(Some(&first)).await;

    let response = app.get(&format!("/users/{user_id}"), Some(&second)).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn logout_without_token_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.post_logout(None).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await, "No token provided");
}

#[tokio::test]
async fn logout_twice_succeeds() {
    let app = TestApp::new().await;
    app.register("1234567890").await;
    let token = app.login("1234567890").await;

    assert_eq!(app.post_logout(Some(&token)).await.status().as_u16(), 200);
    assert_eq!(app.post_logout(Some(&token)).await.status().as_u16(), 200);
}

#[tokio::test]
async fn login_is_rate_limited() {
    let app = TestApp::new().await;

    for _ in 0..5 {
        let response = app.post_login(&login_body("5555555555", PASSWORD)).await;
        assert_eq!(response.status().as_u16(), 401);
    }

    let response = app.post_login(&login_body("5555555555", PASSWORD)).await;
    assert_eq!(response.status().as_u16(), 429);
    assert_eq!(
        error_message(response).await,
        "Too many login attempts, please try again later."
    );
}
