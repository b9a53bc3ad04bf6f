use kiosk_core::{AccessToken, AccessTokenStore, AccessTokenStoreError, TokenId, UserId};
use redis::{AsyncCommands, Pipeline, aio::MultiplexedConnection};

/// Seconds an expired token is kept before Redis reclaims it. Expiry itself is
/// still decided from `created_at + ttl` on read.
const RECLAIM_GRACE_SECONDS: u64 = 300;

/// Token store backed by Redis. Each token is a JSON value under its own key;
/// a per-user set indexes the sessions of an owner.
///
/// The owner set lives as long as the longest-lived token in it and loses a
/// member whenever that token is deleted.
#[derive(Clone)]
pub struct RedisAccessTokenStore {
    conn: MultiplexedConnection,
}

impl RedisAccessTokenStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

fn database_error(e: impl std::fmt::Display) -> AccessTokenStoreError {
    AccessTokenStoreError::DatabaseError(e.to_string())
}

#[async_trait::async_trait]
impl AccessTokenStore for RedisAccessTokenStore {
    #[tracing::instrument(name = "Storing access token in Redis", skip_all)]
    async fn create_token(&self, token: AccessToken) -> Result<AccessToken, AccessTokenStoreError> {
        let value = serde_json::to_string(&token).map_err(database_error)?;

        let mut conn = self.conn.clone();
        create_pipeline(&token, value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(database_error)?;

        Ok(token)
    }

    #[tracing::instrument(name = "Retrieving access token from Redis", skip_all)]
    async fn find_token(&self, id: &TokenId) -> Result<Option<AccessToken>, AccessTokenStoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(get_key(id)).await.map_err(database_error)?;

        value
            .map(|value| serde_json::from_str(&value).map_err(database_error))
            .transpose()
    }

    #[tracing::instrument(name = "Deleting access token from Redis", skip_all)]
    async fn delete_token(&self, id: &TokenId) -> Result<u64, AccessTokenStoreError> {
        let mut conn = self.conn.clone();

        // The owner is only known from the stored value.
        let Some(token) = self.find_token(id).await? else {
            return Ok(0);
        };

        let (deleted,): (u64,) = delete_pipeline(&token)
            .query_async(&mut conn)
            .await
            .map_err(database_error)?;

        Ok(deleted)
    }

    #[tracing::instrument(name = "Deleting access tokens of user from Redis", skip_all)]
    async fn delete_tokens_of(&self, user_id: UserId) -> Result<u64, AccessTokenStoreError> {
        let owner_key = get_owner_key(user_id);

        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn
            .smembers(owner_key.as_str())
            .await
            .map_err(database_error)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let keys: Vec<String> = ids
            .iter()
            .map(|id| format!("{ACCESS_TOKEN_KEY_PREFIX}{id}"))
            .collect();
        // The set may still list tokens that Redis already reclaimed; DEL only
        // counts the keys that were actually present.
        let (deleted,): (u64,) = redis::pipe()
            .atomic()
            .del(keys)
            .del(owner_key.as_str())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(database_error)?;

        Ok(deleted)
    }
}

const ACCESS_TOKEN_KEY_PREFIX: &str = "access_token:";
const USER_TOKENS_KEY_PREFIX: &str = "user_tokens:";

fn get_key(id: &TokenId) -> String {
    format!("{}{}", ACCESS_TOKEN_KEY_PREFIX, id)
}

fn get_owner_key(user_id: UserId) -> String {
    format!("{}{}", USER_TOKENS_KEY_PREFIX, user_id)
}

/// Store the token and index it under its owner. `EXPIRE NX` gives a new set a
/// lifetime and `EXPIRE GT` only ever extends it, so the set outlives every
/// token it lists.
fn create_pipeline(token: &AccessToken, value: String) -> Pipeline {
    let ttl = u64::from(token.ttl) + RECLAIM_GRACE_SECONDS;
    let owner_key = get_owner_key(token.user_id);

    let mut pipe = redis::pipe();
    pipe.atomic()
        .set_ex(get_key(&token.id), value, ttl)
        .ignore()
        .sadd(owner_key.as_str(), token.id.to_string())
        .ignore()
        .cmd("EXPIRE")
        .arg(owner_key.as_str())
        .arg(ttl)
        .arg("NX")
        .ignore()
        .cmd("EXPIRE")
        .arg(owner_key.as_str())
        .arg(ttl)
        .arg("GT")
        .ignore();
    pipe
}

/// Remove the token and its entry in the owner set. Replies with the number of
/// token keys deleted.
fn delete_pipeline(token: &AccessToken) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .del(get_key(&token.id))
        .srem(get_owner_key(token.user_id), token.id.to_string())
        .ignore();
    pipe
}
