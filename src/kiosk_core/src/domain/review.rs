use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{user::UserId, validation::ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(i64);

impl ReviewId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("Mark must be between 0 and 5")]
    MarkOutOfRange,
    #[error("Comment is required")]
    MissingComment,
}

/// Rating from 0 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Mark(u8);

impl Mark {
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Mark {
    type Error = ReviewError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(ReviewError::MarkOutOfRange)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    /// The user being reviewed.
    pub user_id: UserId,
    pub author_id: UserId,
    pub comment: String,
    pub mark: Mark,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user_id: UserId,
    pub author_id: UserId,
    pub comment: String,
    pub mark: Mark,
}

impl NewReview {
    pub fn parse(
        user_id: UserId,
        author_id: UserId,
        comment: String,
        mark: i64,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let comment = comment.trim();
        if comment.is_empty() {
            errors.push("comment", ReviewError::MissingComment.to_string());
        }
        let mark = errors.check("mark", Mark::try_from(mark));

        match mark {
            Some(mark) if errors.is_empty() => Ok(Self {
                user_id,
                author_id,
                comment: comment.to_owned(),
                mark,
            }),
            _ => Err(errors),
        }
    }
}
