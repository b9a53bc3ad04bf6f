use std::time::Duration;

use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use kiosk_adapters::{
    Argon2Hasher, HashMapAccessTokenStore, HashMapKioskStore, HashMapReviewStore, HashMapUserStore,
    config::test,
};
use kiosk_api::{AllowedOrigins, KioskApi, LoginRateLimiter};
use serde_json::{Value, json};

pub const PASSWORD: &str = "password123";
pub const ALLOWED_ORIGIN: &str = "http://localhost:8000";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_token_ttl(3600).await
    }

    /// Spawn the API over fresh in-memory stores on an ephemeral port.
    pub async fn with_token_ttl(token_ttl: u32) -> Self {
        let api = KioskApi::new(
            HashMapUserStore::new(),
            HashMapAccessTokenStore::new(),
            HashMapKioskStore::new(),
            HashMapReviewStore::new(),
            Argon2Hasher,
            token_ttl,
            LoginRateLimiter::new(5, Duration::from_secs(60)),
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind address");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let origins = AllowedOrigins::new(vec![ALLOWED_ORIGIN.to_owned()]);
        tokio::spawn(async move {
            api.run_standalone(listener, Some(origins))
                .await
                .expect("Failed to run app");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_register(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(self.url("/users"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(self.url("/users/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_logout(&self, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.post(self.url("/users/logout"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.http_client
            .request(method, self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user with a random name and return its id.
    pub async fn register(&self, phone: &str) -> i64 {
        let response = self.post_register(&registration_body(phone)).await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        body["user"]["id"].as_i64().unwrap()
    }

    /// Log in with [`PASSWORD`] and return the bearer token.
    pub async fn login(&self, phone: &str) -> String {
        let response = self.post_login(&login_body(phone, PASSWORD)).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_owned()
    }
}

pub fn registration_body(phone: &str) -> Value {
    let firstname: String = FirstName().fake();
    let lastname: String = LastName().fake();
    json!({
        "firstname": firstname,
        "lastname": lastname,
        "countryCode": "+1",
        "phone": phone,
        "password": PASSWORD
    })
}

pub fn login_body(phone: &str, password: &str) -> Value {
    json!({ "countryCode": "+1", "phone": phone, "password": password })
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap_or_default().to_owned()
}
