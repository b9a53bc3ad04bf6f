use std::net::SocketAddr;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request,
    },
    middleware::from_fn_with_state,
    routing::{get, post},
};
use kiosk_adapters::{AllowedOrigins, BearerTokenValidator};
use kiosk_application::{IdentityService, KioskService, ReviewService};
use kiosk_axum::{
    LoginRateLimiter, limit_login_attempts, require_auth,
    routes::{
        create_kiosk, create_review, delete_kiosk, delete_user, get_kiosk, get_user, health,
        list_reviews, login, logout, register, update_kiosk, update_user,
    },
};
use kiosk_core::{AccessTokenStore, KioskStore, PasswordHasher, ReviewStore, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The kiosk HTTP API with all its routes.
pub struct KioskApi {
    router: Router,
}

impl KioskApi {
    /// Create the API over the given stores.
    ///
    /// # Arguments
    /// * `user_store` - Users, shared by identity, reviews and the auth gate
    /// * `token_store` - Session tokens
    /// * `kiosk_store` - Kiosks
    /// * `review_store` - Reviews
    /// * `hasher` - Password hasher used on registration, login and password change
    /// * `token_ttl` - Lifetime in seconds of tokens issued by login
    /// * `login_limiter` - Limits login attempts per client
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc<RwLock> or a pool handle.
    /// Each group of routes is given only the service it needs.
    pub fn new<U, T, K, R, H>(
        user_store: U,
        token_store: T,
        kiosk_store: K,
        review_store: R,
        hasher: H,
        token_ttl: u32,
        login_limiter: LoginRateLimiter,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        T: AccessTokenStore + Clone + 'static,
        K: KioskStore + Clone + 'static,
        R: ReviewStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
    {
        let identity = IdentityService::new(user_store.clone(), token_store, hasher, token_ttl);
        let validator = BearerTokenValidator::new(identity.tokens().clone());
        let kiosks = KioskService::new(kiosk_store);
        let reviews = ReviewService::new(review_store, user_store);

        let public = Router::new()
            .route("/health", get(health))
            .route("/users", post(register::<U, T, H>))
            .route("/users/logout", post(logout::<U, T, H>))
            .with_state(identity.clone());

        let login_route = Router::new()
            .route("/users/login", post(login::<U, T, H>))
            .route_layer(from_fn_with_state(login_limiter, limit_login_attempts))
            .with_state(identity.clone());

        // Everything below the auth gate
        let protected = Router::new()
            .route(
                "/users/{id}",
                get(get_user::<U, T, H>)
                    .patch(update_user::<U, T, H>)
                    .delete(delete_user::<U, T, H>),
            )
            .with_state(identity)
            .route("/kiosks", post(create_kiosk::<K>))
            .route(
                "/kiosks/{id}",
                get(get_kiosk::<K>)
                    .put(update_kiosk::<K>)
                    .delete(delete_kiosk::<K>),
            )
            .with_state(kiosks)
            .route(
                "/users/{id}/reviews",
                post(create_review::<R, U>).get(list_reviews::<R, U>),
            )
            .with_state(reviews)
            .route_layer(from_fn_with_state(
                validator,
                require_auth::<BearerTokenValidator<T, U>>,
            ));

        let router = public.merge(login_route).merge(protected);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the API into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve the API on `listener` until Ctrl+C.
    ///
    /// The peer address is made available to handlers, which the login rate
    /// limiter falls back on when no forwarding header is present.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Kiosk API listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
