use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{user::UserId, validation::ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KioskId(i64);

impl KioskId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for KioskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoPointError {
    #[error("Geolocation is required")]
    Missing,
    #[error("Latitude must be between -90 and 90")]
    Latitude,
    #[error("Longitude must be between -180 and 180")]
    Longitude,
}

/// WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::Latitude);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::Longitude);
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kiosk {
    pub id: KioskId,
    pub title: String,
    pub description: String,
    pub geolocation: GeoPoint,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewKiosk {
    pub title: String,
    pub description: String,
    pub geolocation: GeoPoint,
    pub user_id: UserId,
}

impl NewKiosk {
    /// Validate raw input for a kiosk owned by `owner`.
    pub fn parse(
        title: String,
        description: String,
        geolocation: Option<(f64, f64)>,
        owner: UserId,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = errors.check("title", required_text(title, "Title"));
        let description = errors.check("description", required_text(description, "Description"));
        let geolocation = errors.check(
            "geolocation",
            geolocation
                .ok_or(GeoPointError::Missing)
                .and_then(|(lat, lng)| GeoPoint::new(lat, lng)),
        );

        match (title, description, geolocation) {
            (Some(title), Some(description), Some(geolocation)) => Ok(Self {
                title,
                description,
                geolocation,
                user_id: owner,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KioskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub geolocation: Option<GeoPoint>,
}

impl KioskPatch {
    pub fn parse(
        title: Option<String>,
        description: Option<String>,
        geolocation: Option<(f64, f64)>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = title.and_then(|v| errors.check("title", required_text(v, "Title")));
        let description =
            description.and_then(|v| errors.check("description", required_text(v, "Description")));
        let geolocation = geolocation
            .and_then(|(lat, lng)| errors.check("geolocation", GeoPoint::new(lat, lng)));

        errors.into_result()?;

        Ok(Self {
            title,
            description,
            geolocation,
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0} is required")]
struct MissingText(&'static str);

fn required_text(value: String, label: &'static str) -> Result<String, MissingText> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MissingText(label));
    }
    Ok(trimmed.to_owned())
}
