use chrono::Utc;
use kiosk_core::{
    AccessToken, AccessTokenStore, AccessTokenStoreError, TokenId, User, UserId, UserStore,
    UserStoreError,
};

/// Error types for the token service. Only store faults end up here; an
/// absent or expired token is an ordinary outcome, not an error.
#[derive(Debug, thiserror::Error)]
pub enum TokenServiceError {
    #[error("Token store error: {0}")]
    TokenStoreError(#[from] AccessTokenStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Where a token stands after it has been looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    /// Present and within its TTL.
    Active(AccessToken),
    /// Was present but past its TTL; it has just been deleted.
    Expired,
    /// Never issued, revoked, or already cleaned up.
    Absent,
}

/// Outcome of resolving a bearer token to the user behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerResolution {
    Resolved { user: User, token: AccessToken },
    /// Absent or expired.
    TokenInvalid,
    /// The token is valid but its owner no longer exists.
    OwnerMissing,
}

/// Issues, validates and revokes opaque session tokens.
///
/// Expiry is lazy: validity is computed from `created_at + ttl` on every read
/// and an expired token is deleted the first time it is observed. Access never
/// extends the TTL.
#[derive(Clone)]
pub struct TokenService<T, U>
where
    T: AccessTokenStore,
    U: UserStore,
{
    token_store: T,
    user_store: U,
}

impl<T, U> TokenService<T, U>
where
    T: AccessTokenStore,
    U: UserStore,
{
    pub fn new(token_store: T, user_store: U) -> Self {
        Self {
            token_store,
            user_store,
        }
    }

    /// Issue a new active token for `owner`. Other sessions of the same owner
    /// are left alone.
    #[tracing::instrument(name = "TokenService::issue", skip(self))]
    pub async fn issue(&self, ttl: u32, owner: UserId) -> Result<AccessToken, TokenServiceError> {
        let token = AccessToken::issue(ttl, owner, Utc::now());
        let token = self.token_store.create_token(token).await?;
        tracing::debug!(expires_at = %token.expires_at(), "Issued access token");
        Ok(token)
    }

    /// Look a token up, deleting it if it turns out to be expired.
    #[tracing::instrument(name = "TokenService::check", skip_all)]
    pub async fn check(&self, id: &TokenId) -> Result<TokenState, TokenServiceError> {
        let Some(token) = self.token_store.find_token(id).await? else {
            return Ok(TokenState::Absent);
        };

        if token.is_expired_at(Utc::now()) {
            // A concurrent check may have deleted it already; 0 rows is fine.
            let deleted = self.token_store.delete_token(id).await?;
            tracing::debug!(deleted, "Removed expired access token");
            return Ok(TokenState::Expired);
        }

        Ok(TokenState::Active(token))
    }

    pub async fn validate(&self, id: &TokenId) -> Result<bool, TokenServiceError> {
        Ok(matches!(self.check(id).await?, TokenState::Active(_)))
    }

    /// Delete a token. Idempotent: returns the number of records removed,
    /// which is 0 when the token did not exist.
    #[tracing::instrument(name = "TokenService::revoke", skip_all)]
    pub async fn revoke(&self, id: &TokenId) -> Result<u64, TokenServiceError> {
        Ok(self.token_store.delete_token(id).await?)
    }

    /// Delete every session of `owner`.
    #[tracing::instrument(name = "TokenService::revoke_all", skip(self))]
    pub async fn revoke_all(&self, owner: UserId) -> Result<u64, TokenServiceError> {
        Ok(self.token_store.delete_tokens_of(owner).await?)
    }

    /// Re-validate a token and load its owner.
    #[tracing::instrument(name = "TokenService::resolve_owner", skip_all)]
    pub async fn resolve_owner(&self, id: &TokenId) -> Result<OwnerResolution, TokenServiceError> {
        let token = match self.check(id).await? {
            TokenState::Active(token) => token,
            TokenState::Expired | TokenState::Absent => return Ok(OwnerResolution::TokenInvalid),
        };

        match self.user_store.get_user(token.user_id).await {
            Ok(user) => Ok(OwnerResolution::Resolved { user, token }),
            Err(UserStoreError::UserNotFound) => {
                tracing::warn!(user_id = %token.user_id, "Active token without owner");
                Ok(OwnerResolution::OwnerMissing)
            }
            Err(e) => Err(e.into()),
        }
    }
}
