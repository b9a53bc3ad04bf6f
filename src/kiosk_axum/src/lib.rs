//! Axum integration for the kiosk services.
//!
//! Route handlers are generic over the store and hasher ports; the concrete
//! types are chosen where the router is assembled (see `kiosk_api`).
//!
//! ```ignore
//! use kiosk_axum::{middleware::require_auth, routes};
//!
//! let protected = Router::new()
//!     .route("/kiosks", post(routes::create_kiosk::<PostgresKioskStore>))
//!     .with_state(kiosk_service)
//!     .route_layer(from_fn_with_state(validator, require_auth::<Validator>));
//! ```

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{Authenticated, LoginRateLimiter, client_ip, limit_login_attempts, require_auth};
