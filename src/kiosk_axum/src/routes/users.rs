use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kiosk_application::IdentityService;
use kiosk_core::{AccessTokenStore, PasswordHasher, ProfileUpdate, User, UserId, UserStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, middleware::Authenticated};

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct UpdateUserResponse {
    pub success: &'static str,
    pub user: User,
}

#[derive(Serialize)]
pub struct DeleteUserResponse {
    pub success: &'static str,
}

#[tracing::instrument(name = "Get user", skip(identity, caller), fields(caller = %caller.id))]
pub async fn get_user<U, T, H>(
    State(identity): State<IdentityService<U, T, H>>,
    Authenticated(caller): Authenticated<User>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    Ok(Json(identity.profile(caller.id, id).await?))
}

#[tracing::instrument(name = "Update user", skip(identity, caller, request), fields(caller = %caller.id))]
pub async fn update_user<U, T, H>(
    State(identity): State<IdentityService<U, T, H>>,
    Authenticated(caller): Authenticated<User>,
    Path(id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    let update = ProfileUpdate::parse(request.firstname, request.lastname, request.password)?;

    let user = identity.update_profile(caller.id, id, update).await?;

    Ok(Json(UpdateUserResponse {
        success: "User updated",
        user,
    }))
}

#[tracing::instrument(name = "Delete user", skip(identity, caller), fields(caller = %caller.id))]
pub async fn delete_user<U, T, H>(
    State(identity): State<IdentityService<U, T, H>>,
    Authenticated(caller): Authenticated<User>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone,
    T: AccessTokenStore,
    H: PasswordHasher,
{
    identity.delete_account(caller.id, id).await?;

    Ok(Json(DeleteUserResponse {
        success: "User deleted",
    }))
}
