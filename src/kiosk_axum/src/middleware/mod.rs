//! Request middleware shared by the kiosk routes.

pub mod auth;
pub mod client_ip;
pub mod rate_limit;

pub use auth::{Authenticated, require_auth};
pub use client_ip::client_ip;
pub use rate_limit::{LoginRateLimiter, limit_login_attempts};
