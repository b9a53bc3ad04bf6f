use std::time::Duration;

use color_eyre::eyre::Result;
use kiosk::{
    AccessTokenStore, AppSettings, Argon2Hasher, KioskApi, LoginRateLimiter, MIGRATOR,
    PostgresAccessTokenStore, PostgresKioskStore, PostgresReviewStore, PostgresUserStore,
    RedisAccessTokenStore, TokenBackend,
};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AppSettings::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(settings.postgres.max_connections)
        .connect(settings.postgres.url.expose_secret())
        .await?;

    MIGRATOR.run(&pg_pool).await?;

    match settings.auth.token_backend {
        TokenBackend::Postgres => {
            let token_store = PostgresAccessTokenStore::new(pg_pool.clone());
            serve(&settings, pg_pool, token_store).await
        }
        TokenBackend::Redis => {
            let redis_client =
                redis::Client::open(format!("redis://{}/", settings.redis.host_name))?;
            let redis_conn = redis_client.get_multiplexed_async_connection().await?;
            serve(&settings, pg_pool, RedisAccessTokenStore::new(redis_conn)).await
        }
    }
}

async fn serve<T>(settings: &AppSettings, pg_pool: PgPool, token_store: T) -> Result<()>
where
    T: AccessTokenStore + Clone + 'static,
{
    let api = KioskApi::new(
        PostgresUserStore::new(pg_pool.clone()),
        token_store,
        PostgresKioskStore::new(pg_pool.clone()),
        PostgresReviewStore::new(pg_pool),
        Argon2Hasher,
        settings.auth.token_ttl_seconds,
        LoginRateLimiter::new(
            settings.rate_limit.max_attempts,
            Duration::from_secs(settings.rate_limit.window_seconds),
        )
        .trust_proxy_headers(settings.rate_limit.trust_proxy_headers),
    );

    let allowed_origins = &settings.cors.allowed_origins;
    let allowed_origins = (!allowed_origins.is_empty()).then(|| allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&settings.server.address).await?;
    tracing::info!(token_backend = ?settings.auth.token_backend, "Starting kiosk API");

    api.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
