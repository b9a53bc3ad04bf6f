use chrono::{DateTime, Utc};
use kiosk_core::{Mark, NewReview, Review, ReviewId, ReviewStore, ReviewStoreError, UserId};
use sqlx::{PgPool, Pool, Postgres};

#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    user_id: i64,
    author_id: i64,
    comment: String,
    mark: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = ReviewStoreError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: ReviewId::new(row.id),
            user_id: UserId::new(row.user_id),
            author_id: UserId::new(row.author_id),
            comment: row.comment,
            mark: Mark::try_from(i64::from(row.mark))
                .map_err(|e| ReviewStoreError::UnexpectedError(e.to_string()))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const REVIEW_COLUMNS: &str = "id, user_id, author_id, comment, mark, created_at, updated_at";

#[async_trait::async_trait]
impl ReviewStore for PostgresReviewStore {
    #[tracing::instrument(name = "Adding review to PostgreSQL", skip_all)]
    async fn add_review(&self, review: NewReview) -> Result<Review, ReviewStoreError> {
        let row: ReviewRow = sqlx::query_as(&format!(
            r#"
                INSERT INTO reviews (user_id, author_id, comment, mark)
                VALUES ($1, $2, $3, $4)
                RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.user_id.as_i64())
        .bind(review.author_id.as_i64())
        .bind(&review.comment)
        .bind(i16::from(review.mark.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ReviewStoreError::UserNotFound;
                }
            }
            ReviewStoreError::UnexpectedError(e.to_string())
        })?;

        Review::try_from(row)
    }

    #[tracing::instrument(name = "Listing reviews from PostgreSQL", skip_all)]
    async fn reviews_of(&self, user_id: UserId) -> Result<Vec<Review>, ReviewStoreError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ReviewStoreError::UnexpectedError(e.to_string()))?;

        rows.into_iter().map(Review::try_from).collect()
    }
}
