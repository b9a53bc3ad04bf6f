use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use kiosk_application::KioskService;
use kiosk_core::{Kiosk, KioskId, KioskPatch, KioskStore, NewKiosk, User};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, middleware::Authenticated};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeolocationRequest {
    pub lat: f64,
    pub lng: f64,
}

impl From<GeolocationRequest> for (f64, f64) {
    fn from(point: GeolocationRequest) -> Self {
        (point.lat, point.lng)
    }
}

#[derive(Deserialize)]
pub struct CreateKioskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub geolocation: Option<GeolocationRequest>,
}

#[derive(Deserialize)]
pub struct UpdateKioskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub geolocation: Option<GeolocationRequest>,
}

#[derive(Serialize)]
pub struct UpdateKioskResponse {
    pub success: &'static str,
    pub kiosk: Kiosk,
}

#[derive(Serialize)]
pub struct DeleteKioskResponse {
    pub success: &'static str,
}

#[tracing::instrument(name = "Create kiosk", skip_all, fields(caller = %caller.id))]
pub async fn create_kiosk<K>(
    State(kiosks): State<KioskService<K>>,
    Authenticated(caller): Authenticated<User>,
    Json(request): Json<CreateKioskRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    K: KioskStore,
{
    let kiosk = NewKiosk::parse(
        request.title,
        request.description,
        request.geolocation.map(Into::into),
        caller.id,
    )?;

    let kiosk = kiosks.create(kiosk).await?;

    Ok((StatusCode::CREATED, Json(kiosk)))
}

#[tracing::instrument(name = "Get kiosk", skip(kiosks, _caller))]
pub async fn get_kiosk<K>(
    State(kiosks): State<KioskService<K>>,
    Authenticated(_caller): Authenticated<User>,
    Path(id): Path<KioskId>,
) -> Result<impl IntoResponse, ApiError>
where
    K: KioskStore,
{
    Ok(Json(kiosks.get(id).await?))
}

#[tracing::instrument(name = "Update kiosk", skip(kiosks, caller, request), fields(caller = %caller.id))]
pub async fn update_kiosk<K>(
    State(kiosks): State<KioskService<K>>,
    Authenticated(caller): Authenticated<User>,
    Path(id): Path<KioskId>,
    Json(request): Json<UpdateKioskRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    K: KioskStore,
{
    let patch = KioskPatch::parse(
        request.title,
        request.description,
        request.geolocation.map(Into::into),
    )?;

    let kiosk = kiosks.update(caller.id, id, patch).await?;

    Ok(Json(UpdateKioskResponse {
        success: "Kiosk updated",
        kiosk,
    }))
}

#[tracing::instrument(name = "Delete kiosk", skip(kiosks, caller), fields(caller = %caller.id))]
pub async fn delete_kiosk<K>(
    State(kiosks): State<KioskService<K>>,
    Authenticated(caller): Authenticated<User>,
    Path(id): Path<KioskId>,
) -> Result<impl IntoResponse, ApiError>
where
    K: KioskStore,
{
    kiosks.delete(caller.id, id).await?;

    Ok(Json(DeleteKioskResponse {
        success: "Kiosk deleted",
    }))
}
