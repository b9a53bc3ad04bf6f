use async_trait::async_trait;
use http::{HeaderMap, header::AUTHORIZATION};
use kiosk_application::{OwnerResolution, TokenService};
use kiosk_core::{AccessTokenStore, AuthValidator, TokenId, User, UserStore};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves `Authorization: Bearer <token>` to the user owning the token.
#[derive(Clone)]
pub struct BearerTokenValidator<T, U>
where
    T: AccessTokenStore,
    U: UserStore,
{
    tokens: TokenService<T, U>,
}

impl<T, U> BearerTokenValidator<T, U>
where
    T: AccessTokenStore,
    U: UserStore,
{
    pub fn new(tokens: TokenService<T, U>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl<T, U> AuthValidator for BearerTokenValidator<T, U>
where
    T: AccessTokenStore + Clone + 'static,
    U: UserStore + Clone + 'static,
{
    type Claims = User;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    #[tracing::instrument(name = "BearerTokenValidator::validate", skip_all)]
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = extract_bearer_token(&parts.headers)?;

        // Anything that is not a UUID cannot have been issued by us.
        let id: TokenId = token.parse().map_err(|_| TokenAuthError::InvalidToken)?;

        let resolution = self
            .tokens
            .resolve_owner(&id)
            .await
            .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;

        match resolution {
            OwnerResolution::Resolved { user, .. } => Ok(user),
            OwnerResolution::TokenInvalid => Err(TokenAuthError::InvalidToken),
            OwnerResolution::OwnerMissing => Err(TokenAuthError::UserNotFound),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Pull the token out of the `Authorization` header. A missing header, a
/// non-bearer scheme and an empty token all count as no token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(TokenAuthError::MissingToken)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(TokenAuthError::MissingToken)?;

    if token.is_empty() {
        return Err(TokenAuthError::MissingToken);
    }

    Ok(token)
}
