use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    access_token::{AccessToken, TokenId},
    kiosk::{Kiosk, KioskId, KioskPatch, NewKiosk},
    natural_key::NaturalKey,
    review::{NewReview, Review},
    user::{NewUser, User, UserCredentials, UserId, UserPatch},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Credential store. The natural key is unique; implementations must turn a
/// violation of that constraint into [`UserStoreError::UserAlreadyExists`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError>;
    /// Login lookup. Absence is `Ok(None)`, not an error.
    async fn find_credentials(
        &self,
        key: &NaturalKey,
    ) -> Result<Option<UserCredentials>, UserStoreError>;
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError>;
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError>;
}

// AccessTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum AccessTokenStoreError {
    #[error("Token owner not found")]
    OwnerNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PartialEq for AccessTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::OwnerNotFound, Self::OwnerNotFound)
                | (Self::DatabaseError(_), Self::DatabaseError(_))
        )
    }
}

/// Token store. Deletes are idempotent and report how many records went away,
/// so racing deleters of the same token never see an error.
#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    async fn create_token(&self, token: AccessToken) -> Result<AccessToken, AccessTokenStoreError>;
    async fn find_token(&self, id: &TokenId) -> Result<Option<AccessToken>, AccessTokenStoreError>;
    async fn delete_token(&self, id: &TokenId) -> Result<u64, AccessTokenStoreError>;
    async fn delete_tokens_of(&self, user_id: UserId) -> Result<u64, AccessTokenStoreError>;
}

// KioskStore port trait and errors
#[derive(Debug, Error)]
pub enum KioskStoreError {
    #[error("Kiosk not found")]
    KioskNotFound,
    #[error("Kiosk owner not found")]
    OwnerNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait KioskStore: Send + Sync {
    async fn add_kiosk(&self, kiosk: NewKiosk) -> Result<Kiosk, KioskStoreError>;
    async fn get_kiosk(&self, id: KioskId) -> Result<Option<Kiosk>, KioskStoreError>;
    async fn update_kiosk(&self, id: KioskId, patch: KioskPatch) -> Result<Kiosk, KioskStoreError>;
    async fn delete_kiosk(&self, id: KioskId) -> Result<(), KioskStoreError>;
}

// ReviewStore port trait and errors
#[derive(Debug, Error)]
pub enum ReviewStoreError {
    #[error("Reviewed user not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn add_review(&self, review: NewReview) -> Result<Review, ReviewStoreError>;
    /// Reviews about `user_id`, newest first.
    async fn reviews_of(&self, user_id: UserId) -> Result<Vec<Review>, ReviewStoreError>;
}
