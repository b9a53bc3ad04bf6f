mod api;
mod tracing;

pub use api::KioskApi;

// Re-export commonly used types
pub use kiosk_adapters::AllowedOrigins;
pub use kiosk_axum::LoginRateLimiter;
