use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kiosk_application::IdentityService;
use kiosk_core::{AccessTokenStore, PasswordHasher, Registration, User, UserStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub phone: String,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: &'static str,
    pub user: User,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, T, H>(
    State(identity): State<IdentityService<U, T, H>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    let registration = Registration::parse(
        request.firstname,
        request.lastname,
        request.country_code,
        request.phone,
        request.password.unwrap_or_else(|| Secret::new(String::new())),
    )?;

    let user = identity.register(registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: "account created!",
            user,
        }),
    ))
}
