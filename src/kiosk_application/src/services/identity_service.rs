use kiosk_core::{
    AccessToken, AccessTokenStore, NaturalKey, NewUser, Password, PasswordHasher,
    PasswordHasherError, ProfileUpdate, Registration, TokenId, User, UserCredentials, UserId,
    UserPatch, UserStore, UserStoreError,
};

use super::token_service::{TokenService, TokenServiceError};

/// Error types specific to registration
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] PasswordHasherError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for RegisterError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::UserAlreadyExists => Self::UserAlreadyExists,
            e => Self::UserStoreError(e),
        }
    }
}

/// Error types specific to login. Unknown user and wrong password both end up
/// as `InvalidCredentials`.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] PasswordHasherError),
    #[error("Token service error: {0}")]
    TokenServiceError(#[from] TokenServiceError),
}

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Token service error: {0}")]
    TokenServiceError(#[from] TokenServiceError),
}

/// Error types for reading, changing and deleting a profile
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Not allowed to access another user's profile")]
    Forbidden,
    #[error("User not found")]
    UserNotFound,
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] PasswordHasherError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Token service error: {0}")]
    TokenServiceError(#[from] TokenServiceError),
}

impl From<UserStoreError> for ProfileError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::UserNotFound => Self::UserNotFound,
            e => Self::UserStoreError(e),
        }
    }
}

/// Response of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: AccessToken,
    pub user_id: UserId,
}

/// Registration, login, logout and self-service profile management.
#[derive(Clone)]
pub struct IdentityService<U, T, H>
where
    U: UserStore,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    user_store: U,
    tokens: TokenService<T, U>,
    hasher: H,
    token_ttl: u32,
}

impl<U, T, H> IdentityService<U, T, H>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, token_store: T, hasher: H, token_ttl: u32) -> Self {
        Self {
            tokens: TokenService::new(token_store, user_store.clone()),
            user_store,
            hasher,
            token_ttl,
        }
    }

    pub fn tokens(&self) -> &TokenService<T, U> {
        &self.tokens
    }

    #[tracing::instrument(name = "IdentityService::register", skip_all)]
    pub async fn register(&self, registration: Registration) -> Result<User, RegisterError> {
        let password_hash = self.hasher.hash(registration.password).await?;

        let user = self
            .user_store
            .add_user(NewUser {
                firstname: registration.firstname,
                lastname: registration.lastname,
                natural_key: registration.natural_key,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Check the password for `key` and open a new session.
    #[tracing::instrument(name = "IdentityService::login", skip_all)]
    pub async fn login(
        &self,
        key: NaturalKey,
        password: Password,
    ) -> Result<LoginSuccess, LoginError> {
        let credentials = self.user_store.find_credentials(&key).await?;
        let user_id = self.check_password(credentials, password).await?;

        let token = self.tokens.issue(self.token_ttl, user_id).await?;

        Ok(LoginSuccess { token, user_id })
    }

    /// Fail a login whose key cannot belong to any account, after the same
    /// password check an unknown account gets.
    #[tracing::instrument(name = "IdentityService::login_unknown_key", skip_all)]
    pub async fn login_unknown_key(&self, password: Password) -> Result<LoginSuccess, LoginError> {
        self.check_password(None, password).await?;
        Err(LoginError::InvalidCredentials)
    }

    /// A missing account is checked against the decoy hash so it costs as
    /// much as a wrong password.
    async fn check_password(
        &self,
        credentials: Option<UserCredentials>,
        password: Password,
    ) -> Result<UserId, LoginError> {
        let (user_id, expected) = match credentials {
            Some(credentials) => (Some(credentials.user.id), credentials.password_hash),
            None => (None, self.hasher.decoy_hash()),
        };

        let matches = self.hasher.verify(password, expected).await?;

        user_id
            .filter(|_| matches)
            .ok_or(LoginError::InvalidCredentials)
    }

    /// Revoke the session. Revoking an unknown token is not an error.
    #[tracing::instrument(name = "IdentityService::logout", skip_all)]
    pub async fn logout(&self, token: &TokenId) -> Result<u64, LogoutError> {
        Ok(self.tokens.revoke(token).await?)
    }

    #[tracing::instrument(name = "IdentityService::profile", skip(self))]
    pub async fn profile(&self, caller: UserId, target: UserId) -> Result<User, ProfileError> {
        ensure_self(caller, target)?;
        Ok(self.user_store.get_user(target).await?)
    }

    #[tracing::instrument(name = "IdentityService::update_profile", skip(self, update))]
    pub async fn update_profile(
        &self,
        caller: UserId,
        target: UserId,
        update: ProfileUpdate,
    ) -> Result<User, ProfileError> {
        ensure_self(caller, target)?;

        let password_hash = match update.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let patch = UserPatch {
            firstname: update.firstname,
            lastname: update.lastname,
            password_hash,
        };

        Ok(self.user_store.update_user(target, patch).await?)
    }

    /// Delete the account together with every session it still has.
    #[tracing::instrument(name = "IdentityService::delete_account", skip(self))]
    pub async fn delete_account(&self, caller: UserId, target: UserId) -> Result<(), ProfileError> {
        ensure_self(caller, target)?;

        let revoked = self.tokens.revoke_all(target).await?;
        self.user_store.delete_user(target).await?;

        tracing::info!(revoked, "Deleted user");
        Ok(())
    }
}

fn ensure_self(caller: UserId, target: UserId) -> Result<(), ProfileError> {
    if caller != target {
        return Err(ProfileError::Forbidden);
    }
    Ok(())
}
