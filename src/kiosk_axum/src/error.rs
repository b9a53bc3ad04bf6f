use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kiosk_adapters::TokenAuthError;
use kiosk_application::{
    KioskServiceError, LoginError, LogoutError, ProfileError, RegisterError, ReviewServiceError,
    TokenServiceError,
};
use kiosk_core::{FieldError, ValidationErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOGIN_RATE_LIMITED: &str = "Too many login attempts, please try again later.";

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct ValidationErrorResponse<'a> {
    pub errors: &'a [FieldError],
}

/// Every failure an HTTP handler can answer with.
///
/// `Internal` carries the underlying cause for the log only; clients get a
/// generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    TooManyRequests(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn internal(error: impl std::fmt::Display) -> Self {
        ApiError::Internal(error.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            ApiError::ValidationFailed(errors) => (
                status_code,
                Json(ValidationErrorResponse {
                    errors: errors.errors(),
                }),
            )
                .into_response(),
            ApiError::Internal(cause) => {
                tracing::error!(error = %cause, "Request failed");
                let body = Json(ErrorResponse {
                    error: ApiError::Internal(String::new()).to_string(),
                });
                (status_code, body).into_response()
            }
            error => {
                let body = Json(ErrorResponse {
                    error: error.to_string(),
                });
                (status_code, body).into_response()
            }
        }
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken
            | TokenAuthError::InvalidToken
            | TokenAuthError::UserNotFound => ApiError::Unauthenticated(error.to_string()),
            TokenAuthError::UnexpectedError(e) => ApiError::Internal(e),
        }
    }
}

impl From<TokenServiceError> for ApiError {
    fn from(error: TokenServiceError) -> Self {
        ApiError::internal(error)
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserAlreadyExists => ApiError::Conflict(error.to_string()),
            RegisterError::HashingFailed(_) | RegisterError::UserStoreError(_) => {
                ApiError::internal(error)
            }
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::Unauthenticated(error.to_string()),
            LoginError::UserStoreError(_)
            | LoginError::HashingFailed(_)
            | LoginError::TokenServiceError(_) => ApiError::internal(error),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::TokenServiceError(e) => e.into(),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::Forbidden => ApiError::Forbidden(error.to_string()),
            ProfileError::UserNotFound => ApiError::NotFound(error.to_string()),
            ProfileError::HashingFailed(_)
            | ProfileError::UserStoreError(_)
            | ProfileError::TokenServiceError(_) => ApiError::internal(error),
        }
    }
}

impl From<KioskServiceError> for ApiError {
    fn from(error: KioskServiceError) -> Self {
        match error {
            KioskServiceError::NotFound => ApiError::NotFound(error.to_string()),
            KioskServiceError::Forbidden => ApiError::Forbidden(error.to_string()),
            // The owner is the authenticated caller, so a missing owner means it
            // was deleted mid-request.
            KioskServiceError::OwnerNotFound => ApiError::Unauthenticated("User not found".into()),
            KioskServiceError::StoreError(_) => ApiError::internal(error),
        }
    }
}

impl From<ReviewServiceError> for ApiError {
    fn from(error: ReviewServiceError) -> Self {
        match error {
            ReviewServiceError::Forbidden => ApiError::Forbidden(error.to_string()),
            ReviewServiceError::UserNotFound => ApiError::NotFound(error.to_string()),
            ReviewServiceError::ReviewStoreError(_) | ReviewServiceError::UserStoreError(_) => {
                ApiError::internal(error)
            }
        }
    }
}
