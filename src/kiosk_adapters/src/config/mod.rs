pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppSettings, AuthSettings, CorsSettings, PostgresSettings, RateLimitSettings,
    RedisSettings, ServerSettings, TokenBackend,
};
