use kiosk_core::{NewReview, Review, ReviewStore, ReviewStoreError, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("Users cannot review themselves")]
    Forbidden,
    #[error("User not found")]
    UserNotFound,
    #[error("Review store error: {0}")]
    ReviewStoreError(ReviewStoreError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<ReviewStoreError> for ReviewServiceError {
    fn from(e: ReviewStoreError) -> Self {
        match e {
            ReviewStoreError::UserNotFound => Self::UserNotFound,
            e => Self::ReviewStoreError(e),
        }
    }
}

impl From<UserStoreError> for ReviewServiceError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::UserNotFound => Self::UserNotFound,
            e => Self::UserStoreError(e),
        }
    }
}

#[derive(Clone)]
pub struct ReviewService<R, U>
where
    R: ReviewStore,
    U: UserStore,
{
    reviews: R,
    users: U,
}

impl<R, U> ReviewService<R, U>
where
    R: ReviewStore,
    U: UserStore,
{
    pub fn new(reviews: R, users: U) -> Self {
        Self { reviews, users }
    }

    /// Store a review written by `review.author_id` about `review.user_id`.
    #[tracing::instrument(
        name = "ReviewService::create",
        skip_all,
        fields(user_id = %review.user_id, author_id = %review.author_id)
    )]
    pub async fn create(&self, review: NewReview) -> Result<Review, ReviewServiceError> {
        if review.user_id == review.author_id {
            return Err(ReviewServiceError::Forbidden);
        }
        self.users.get_user(review.user_id).await?;

        Ok(self.reviews.add_review(review).await?)
    }

    /// Reviews about `user_id`, newest first.
    #[tracing::instrument(name = "ReviewService::list", skip(self))]
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Review>, ReviewServiceError> {
        self.users.get_user(user_id).await?;
        Ok(self.reviews.reviews_of(user_id).await?)
    }
}
