use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use kiosk_adapters::extract_bearer_token;
use kiosk_application::IdentityService;
use kiosk_core::{AccessTokenStore, PasswordHasher, TokenId, UserStore};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: &'static str,
}

/// Revoke the bearer token of the request.
///
/// Not behind the auth gate: an expired or already revoked token still logs
/// out successfully.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, T, H>(
    State(identity): State<IdentityService<U, T, H>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    let token = extract_bearer_token(&headers).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // A token that is not a UUID was never issued, so there is nothing to revoke.
    if let Ok(id) = token.parse::<TokenId>() {
        let revoked = identity.logout(&id).await?;
        tracing::debug!(revoked, "Logged out");
    }

    Ok(Json(LogoutResponse {
        success: "Logged out",
    }))
}
