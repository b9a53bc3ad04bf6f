use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn missing_header_is_rejected() {
    let app = TestApp::new().await;
    let user_id = app.register("1234567890").await;

    let response = app.get(&format!("/users/{user_id}"), None).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "No token provided");
}

#[tokio::test]
async fn empty_bearer_is_rejected() {
    let app = TestApp::new().await;
    let user_id = app.register("1234567890").await;

    let response = app
        .http_client
        .get(app.url(&format!("/users/{user_id}")))
        .header("Authorization", "Bearer ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = TestApp::new().await;
    let user_id = app.register("1234567890").await;

    let response = app
        .get(
            &format!("/users/{user_id}"),
            Some("9b2c5f0e-8d4a-4c3e-9f1a-2b7d6e5c4a31"),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "Invalid or expired token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::with_token_ttl(0).await;
    let user_id = app.register("1234567890").await;
    let token = app.login("1234567890").await;

    for _ in 0..2 {
        let response = app.get(&format!("/users/{user_id}"), Some(&token)).await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(error_message(response).await, "Invalid or expired token");
    }
}

#[tokio::test]
async fn deleted_account_locks_out_every_session() {
    let app = TestApp::new().await;
    let user_id = app.register("1234567890").await;
    let first = app.login("1234567890").await;
    let second = app.login("1234567890").await;

    let response = app.delete(&format!("/users/{user_id}"), &first).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get(&format!("/users/{user_id}"), Some(&second)).await;
    assert_eq!(response.status().as_u16(), 401);
}
