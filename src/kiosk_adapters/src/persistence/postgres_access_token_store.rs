use chrono::{DateTime, Utc};
use kiosk_core::{AccessToken, AccessTokenStore, AccessTokenStoreError, TokenId, UserId};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Tokens in the `access_tokens` table. Every row references its owner, so
/// deleting a user cascades to its sessions.
#[derive(Clone)]
pub struct PostgresAccessTokenStore {
    pool: PgPool,
}

impl PostgresAccessTokenStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccessTokenRow {
    id: Uuid,
    ttl: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccessTokenRow> for AccessToken {
    type Error = AccessTokenStoreError;

    fn try_from(row: AccessTokenRow) -> Result<Self, Self::Error> {
        let ttl = u32::try_from(row.ttl)
            .map_err(|e| AccessTokenStoreError::DatabaseError(format!("ttl {}: {e}", row.ttl)))?;

        Ok(AccessToken {
            id: TokenId::from(row.id),
            ttl,
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> AccessTokenStoreError {
    AccessTokenStoreError::DatabaseError(e.to_string())
}

#[async_trait::async_trait]
impl AccessTokenStore for PostgresAccessTokenStore {
    #[tracing::instrument(name = "Storing access token in PostgreSQL", skip_all)]
    async fn create_token(&self, token: AccessToken) -> Result<AccessToken, AccessTokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO access_tokens (id, ttl, user_id, created_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(token.id.as_uuid())
        .bind(i64::from(token.ttl))
        .bind(token.user_id.as_i64())
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AccessTokenStoreError::OwnerNotFound;
                }
            }
            database_error(e)
        })?;

        Ok(token)
    }

    #[tracing::instrument(name = "Retrieving access token from PostgreSQL", skip_all)]
    async fn find_token(&self, id: &TokenId) -> Result<Option<AccessToken>, AccessTokenStoreError> {
        let row: Option<AccessTokenRow> = sqlx::query_as(
            "SELECT id, ttl, user_id, created_at FROM access_tokens WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(AccessToken::try_from).transpose()
    }

    #[tracing::instrument(name = "Deleting access token from PostgreSQL", skip_all)]
    async fn delete_token(&self, id: &TokenId) -> Result<u64, AccessTokenStoreError> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "Deleting access tokens of user from PostgreSQL", skip_all)]
    async fn delete_tokens_of(&self, user_id: UserId) -> Result<u64, AccessTokenStoreError> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
