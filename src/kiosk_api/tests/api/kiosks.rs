use reqwest::Method;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn kiosks_are_shared_but_owned() {
    let app = TestApp::new().await;
    let owner_id = app.register("1234567890").await;
    app.register("1111111111").await;
    let owner = app.login("1234567890").await;
    let other = app.login("1111111111").await;

    let response = app
        .send_json(
            Method::POST,
            "/kiosks",
            &owner,
            &json!({
                "title": "Corner shop",
                "description": "Snacks and papers",
                "geolocation": { "lat": 60.17, "lng": 24.94 }
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let kiosk: Value = response.json().await.unwrap();
    assert_eq!(kiosk["userId"], owner_id);
    let path = format!("/kiosks/{}", kiosk["id"]);

    let response = app.get(&path, Some(&other)).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .send_json(Method::PUT, &path, &other, &json!({ "title": "Mine now" }))
        .await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app
        .send_json(Method::PUT, &path, &owner, &json!({ "title": "Kiosk 24/7" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "Kiosk updated");
    assert_eq!(body["kiosk"]["title"], "Kiosk 24/7");

    assert_eq!(app.delete(&path, &other).await.status().as_u16(), 403);
    assert_eq!(app.delete(&path, &owner).await.status().as_u16(), 200);
    assert_eq!(app.get(&path, Some(&owner)).await.status().as_u16(), 404);
}

#[tokio::test]
async fn reviews_about_a_user() {
    let app = TestApp::new().await;
    let reviewed_id = app.register("1111111111").await;
    app.register("1234567890").await;
    let reviewed = app.login("1111111111").await;
    let author = app.login("1234567890").await;
    let path = format!("/users/{reviewed_id}/reviews");

    let response = app
        .send_json(Method::POST, &path, &author, &json!({ "comment": "Great", "mark": 4 }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app
        .send_json(Method::POST, &path, &reviewed, &json!({ "comment": "Me!", "mark": 5 }))
        .await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.get(&path, Some(&reviewed)).await;
    assert_eq!(response.status().as_u16(), 200);
    let reviews: Value = response.json().await.unwrap();
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["mark"], 4);
}
