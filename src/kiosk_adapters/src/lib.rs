pub mod auth_validation;
pub mod config;
pub mod hashing;
pub mod persistence;

pub use auth_validation::bearer_token_validator::{
    BearerTokenValidator, TokenAuthError, extract_bearer_token,
};
pub use config::{AllowedOrigins, AppSettings, TokenBackend};
pub use hashing::argon2_hasher::Argon2Hasher;
pub use persistence::{
    MIGRATOR, hashmap_access_token_store::HashMapAccessTokenStore,
    hashmap_kiosk_store::HashMapKioskStore, hashmap_review_store::HashMapReviewStore,
    hashmap_user_store::HashMapUserStore, postgres_access_token_store::PostgresAccessTokenStore,
    postgres_kiosk_store::PostgresKioskStore, postgres_review_store::PostgresReviewStore,
    postgres_user_store::PostgresUserStore, redis_access_token_store::RedisAccessTokenStore,
};
