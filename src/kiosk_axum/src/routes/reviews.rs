use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use kiosk_application::ReviewService;
use kiosk_core::{NewReview, ReviewStore, User, UserId, UserStore};
use serde::Deserialize;

use crate::{error::ApiError, middleware::Authenticated};

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub comment: String,
    pub mark: Option<i64>,
}

/// Review the user in the path. The author is always the caller.
#[tracing::instrument(name = "Create review", skip(reviews, caller, request), fields(caller = %caller.id))]
pub async fn create_review<R, U>(
    State(reviews): State<ReviewService<R, U>>,
    Authenticated(caller): Authenticated<User>,
    Path(user_id): Path<UserId>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ReviewStore,
    U: UserStore,
{
    // A missing mark is reported the same way as an out of range one.
    let review = NewReview::parse(
        user_id,
        caller.id,
        request.comment,
        request.mark.unwrap_or(-1),
    )?;

    let review = reviews.create(review).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Reviews about the user in the path, newest first.
#[tracing::instrument(name = "List reviews", skip(reviews, _caller))]
pub async fn list_reviews<R, U>(
    State(reviews): State<ReviewService<R, U>>,
    Authenticated(_caller): Authenticated<User>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ReviewStore,
    U: UserStore,
{
    Ok(Json(reviews.list(user_id).await?))
}
