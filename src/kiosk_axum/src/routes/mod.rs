//! Axum route handlers.
//!
//! Handlers take their service from `State`, the caller from
//! [`Authenticated`](crate::middleware::Authenticated) and turn every failure
//! into an [`ApiError`](crate::error::ApiError).

pub mod health;
pub mod kiosks;
pub mod login;
pub mod logout;
pub mod register;
pub mod reviews;
pub mod users;

pub use health::health;
pub use kiosks::{create_kiosk, delete_kiosk, get_kiosk, update_kiosk};
pub use login::login;
pub use logout::logout;
pub use register::register;
pub use reviews::{create_review, list_reviews};
pub use users::{delete_user, get_user, update_user};

#[cfg(test)]
pub(crate) mod test_helpers;
