pub mod services;

#[cfg(test)]
mod test_support;

pub use services::{
    identity_service::{
        IdentityService, LoginError, LoginSuccess, LogoutError, ProfileError, RegisterError,
    },
    kiosk_service::{KioskService, KioskServiceError},
    review_service::{ReviewService, ReviewServiceError},
    token_service::{OwnerResolution, TokenService, TokenServiceError, TokenState},
};
