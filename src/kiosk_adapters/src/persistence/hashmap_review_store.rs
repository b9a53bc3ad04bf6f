use std::sync::Arc;

use chrono::Utc;
use kiosk_core::{NewReview, Review, ReviewId, ReviewStore, ReviewStoreError, UserId};
use tokio::sync::RwLock;

/// Append-only list of reviews; insertion order doubles as creation order.
#[derive(Default, Clone)]
pub struct HashMapReviewStore {
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl HashMapReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ReviewStore for HashMapReviewStore {
    async fn add_review(&self, review: NewReview) -> Result<Review, ReviewStoreError> {
        let mut reviews = self.reviews.write().await;
        let now = Utc::now();
        let review = Review {
            id: ReviewId::new(reviews.len() as i64 + 1),
            user_id: review.user_id,
            author_id: review.author_id,
            comment: review.comment,
            mark: review.mark,
            created_at: now,
            updated_at: now,
        };
        reviews.push(review.clone());
        Ok(review)
    }

    async fn reviews_of(&self, user_id: UserId) -> Result<Vec<Review>, ReviewStoreError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .rev()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect())
    }
}
