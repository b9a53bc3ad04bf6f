use sqlx::migrate::Migrator;

pub mod hashmap_access_token_store;
pub mod hashmap_kiosk_store;
pub mod hashmap_review_store;
pub mod hashmap_user_store;
pub mod postgres_access_token_store;
pub mod postgres_kiosk_store;
pub mod postgres_review_store;
pub mod postgres_user_store;
pub mod redis_access_token_store;

/// Schema migrations for the PostgreSQL stores.
pub static MIGRATOR: Migrator = sqlx::migrate!();
