pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    access_token::{AccessToken, TokenId},
    kiosk::{GeoPoint, GeoPointError, Kiosk, KioskId, KioskPatch, NewKiosk},
    natural_key::{CountryCode, NaturalKey, NaturalKeyError, Phone},
    password::{Password, PasswordError, PasswordHash},
    review::{Mark, NewReview, Review, ReviewError, ReviewId},
    user::{
        Name, NameError, NewUser, ProfileUpdate, Registration, User, UserCredentials, UserId,
        UserPatch,
    },
    validation::{FieldError, ValidationErrors},
};

pub use ports::{
    repositories::{
        AccessTokenStore, AccessTokenStoreError, KioskStore, KioskStoreError, ReviewStore,
        ReviewStoreError, UserStore, UserStoreError,
    },
    services::{PasswordHasher, PasswordHasherError},
};

pub use strategies::auth_validator::AuthValidator;
