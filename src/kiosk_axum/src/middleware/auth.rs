//! The auth gate.
//!
//! [`require_auth`] runs an [`AuthValidator`] in front of the protected routes
//! and stores the resolved claims in the request extensions. Handlers receive
//! them through the [`Authenticated`] extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use kiosk_adapters::TokenAuthError;
use kiosk_core::AuthValidator;

use crate::error::ApiError;

/// Middleware for `axum::middleware::from_fn_with_state`.
///
/// Rejects the request unless the validator accepts it. Nothing behind this
/// layer runs for an unauthenticated request.
pub async fn require_auth<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    V: AuthValidator<RequestParts = Parts>,
    ApiError: From<V::Error>,
{
    let (mut parts, body) = request.into_parts();

    let claims = validator.validate(&parts).await?;
    parts.extensions.insert(claims);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Claims attached by [`require_auth`].
///
/// This is the only source of "who is asking"; path and body ids only address
/// the target resource.
#[derive(Debug, Clone)]
pub struct Authenticated<C>(pub C);

impl<S, C> FromRequestParts<S> for Authenticated<C>
where
    S: Send + Sync,
    C: Clone + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<C>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError::Unauthenticated(TokenAuthError::MissingToken.to_string()))
    }
}
