use axum::{Json, extract::State, response::IntoResponse};
use kiosk_application::IdentityService;
use kiosk_core::{
    AccessTokenStore, CountryCode, NaturalKey, NaturalKeyError, Password, PasswordHasher, Phone,
    TokenId, UserId, UserStore, ValidationErrors,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub phone: String,
    pub password: Option<Secret<String>>,
}

impl LoginRequest {
    /// Only presence is checked here. A key that is present but malformed
    /// cannot belong to any account and comes back as `None`.
    fn parse(self) -> Result<(Option<NaturalKey>, Password), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.country_code.trim().is_empty() {
            errors.push("countryCode", NaturalKeyError::MissingCountryCode.to_string());
        }
        if self.phone.trim().is_empty() {
            errors.push("phone", NaturalKeyError::MissingPhone.to_string());
        }
        let password = errors.check(
            "password",
            Password::try_from(self.password.unwrap_or_else(|| Secret::new(String::new()))),
        );

        match password {
            Some(password) if errors.is_empty() => {
                let key = CountryCode::try_from(self.country_code)
                    .ok()
                    .zip(Phone::try_from(self.phone).ok())
                    .map(|(country_code, phone)| NaturalKey::new(country_code, phone));
                Ok((key, password))
            }
            _ => Err(errors),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: TokenId,
    pub user_id: UserId,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, T, H>(
    State(identity): State<IdentityService<U, T, H>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    let (key, password) = request.parse()?;

    let session = match key {
        Some(key) => identity.login(key, password).await?,
        None => identity.login_unknown_key(password).await?,
    };

    Ok(Json(LoginResponse {
        message: "Auth success",
        token: session.token.id,
        user_id: session.user_id,
    }))
}
