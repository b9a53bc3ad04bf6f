//! A router over in-memory stores for the handler tests.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use kiosk_adapters::{
    BearerTokenValidator, HashMapAccessTokenStore, HashMapKioskStore, HashMapReviewStore,
    HashMapUserStore,
};
use kiosk_application::{IdentityService, KioskService, ReviewService};
use kiosk_core::{
    CountryCode, NaturalKey, Password, PasswordHash, PasswordHasher, PasswordHasherError, Phone,
    Registration, User,
};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use tower::ServiceExt;

use super::{
    create_kiosk, create_review, delete_kiosk, delete_user, get_kiosk, get_user, list_reviews,
    login, logout, register, update_kiosk, update_user,
};
use crate::middleware::require_auth;

pub const PASSWORD: &str = "password123";

/// Reversible stand-in so the handler tests do not pay for argon2.
#[derive(Clone)]
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "plain:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        password: Password,
        expected: PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        Ok(expected.as_ref().expose_secret()
            == &format!("plain:{}", password.as_ref().expose_secret()))
    }

    fn decoy_hash(&self) -> PasswordHash {
        PasswordHash::new(Secret::from("decoy".to_owned()))
    }
}

pub type Users = HashMapUserStore;
pub type Tokens = HashMapAccessTokenStore;
pub type Identity = IdentityService<Users, Tokens, PlainHasher>;
type Validator = BearerTokenValidator<Tokens, Users>;

pub struct TestApp {
    router: Router,
    pub identity: Identity,
}

impl TestApp {
    pub fn new() -> Self {
        let users = HashMapUserStore::new();
        let identity = IdentityService::new(
            users.clone(),
            HashMapAccessTokenStore::new(),
            PlainHasher,
            3600,
        );
        let kiosks = KioskService::new(HashMapKioskStore::new());
        let reviews = ReviewService::new(HashMapReviewStore::new(), users);
        let validator = BearerTokenValidator::new(identity.tokens().clone());

        let protected = Router::new()
            .route(
                "/users/{id}",
                get(get_user::<Users, Tokens, PlainHasher>)
                    .patch(update_user::<Users, Tokens, PlainHasher>)
                    .delete(delete_user::<Users, Tokens, PlainHasher>),
            )
            .with_state(identity.clone())
            .route("/kiosks", post(create_kiosk::<HashMapKioskStore>))
            .route(
                "/kiosks/{id}",
                get(get_kiosk::<HashMapKioskStore>)
                    .put(update_kiosk::<HashMapKioskStore>)
                    .delete(delete_kiosk::<HashMapKioskStore>),
            )
            .with_state(kiosks)
            .route(
                "/users/{id}/reviews",
                post(create_review::<HashMapReviewStore, Users>)
                    .get(list_reviews::<HashMapReviewStore, Users>),
            )
            .with_state(reviews)
            .route_layer(from_fn_with_state(validator, require_auth::<Validator>));

        let public = Router::new()
            .route("/users", post(register::<Users, Tokens, PlainHasher>))
            .route("/users/login", post(login::<Users, Tokens, PlainHasher>))
            .route("/users/logout", post(logout::<Users, Tokens, PlainHasher>))
            .with_state(identity.clone());

        Self {
            router: public.merge(protected),
            identity,
        }
    }

    /// Send a request and decode the JSON body (`Null` when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn register(&self, country_code: &str, phone: &str) -> User {
        let registration = Registration::parse(
            "Jane".to_owned(),
            "Doe".to_owned(),
            country_code.to_owned(),
            phone.to_owned(),
            Secret::from(PASSWORD.to_owned()),
        )
        .unwrap();
        self.identity.register(registration).await.unwrap()
    }

    /// Log in with [`PASSWORD`] and return the bearer token.
    pub async fn login(&self, country_code: &str, phone: &str) -> String {
        let key = NaturalKey::new(
            CountryCode::try_from(country_code.to_owned()).unwrap(),
            Phone::try_from(phone.to_owned()).unwrap(),
        );
        let password = Password::try_from(Secret::from(PASSWORD.to_owned())).unwrap();
        let session = self.identity.login(key, password).await.unwrap();
        session.token.id.to_string()
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    request.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    request.body(Body::empty()).unwrap()
}
