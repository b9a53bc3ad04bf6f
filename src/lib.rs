//! # Kiosk - Kiosk directory backend
//!
//! Facade crate re-exporting the public API of the kiosk workspace: domain
//! types, store ports, services, adapters and the HTTP API.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! kiosk = { path = "../kiosk" }
//! ```
//!
//! ## Structure
//!
//! - **Domain types**: `User`, `AccessToken`, `Kiosk`, `Review`, etc.
//! - **Store ports**: `UserStore`, `AccessTokenStore`, `KioskStore`, `ReviewStore`
//! - **Services**: `TokenService`, `IdentityService`, `KioskService`, `ReviewService`
//! - **Adapters**: in-memory, PostgreSQL and Redis stores, `Argon2Hasher`, settings
//! - **API**: `KioskApi` - router assembly and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use kiosk_core::*;
}

// Re-export most commonly used core types at the root level
pub use kiosk_core::{
    AccessToken, CountryCode, GeoPoint, Kiosk, KioskId, NaturalKey, Password, Phone, Review,
    TokenId, User, UserId, ValidationErrors,
};

// ============================================================================
// Store Ports
// ============================================================================

/// Store and hasher trait definitions
pub mod repositories {
    pub use kiosk_core::{
        AccessTokenStore, AccessTokenStoreError, KioskStore, KioskStoreError, ReviewStore,
        ReviewStoreError, UserStore, UserStoreError,
    };
}

pub use kiosk_core::{
    AccessTokenStore, AccessTokenStoreError, AuthValidator, KioskStore, KioskStoreError,
    PasswordHasher, ReviewStore, ReviewStoreError, UserStore, UserStoreError,
};

// ============================================================================
// Services (Application Layer)
// ============================================================================

/// Application services
pub mod services {
    pub use kiosk_application::*;
}

pub use kiosk_application::{IdentityService, KioskService, ReviewService, TokenService};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers, middleware and errors
    pub mod http {
        pub use kiosk_axum::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use kiosk_adapters::persistence::*;
    }

    /// Bearer token validation
    pub mod auth {
        pub use kiosk_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use kiosk_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use kiosk_adapters::{
    AppSettings, Argon2Hasher, BearerTokenValidator, HashMapAccessTokenStore, HashMapKioskStore,
    HashMapReviewStore, HashMapUserStore, MIGRATOR, PostgresAccessTokenStore, PostgresKioskStore,
    PostgresReviewStore, PostgresUserStore, RedisAccessTokenStore, TokenBackend,
};

// ============================================================================
// HTTP API (Main Entry Point)
// ============================================================================

pub use kiosk_api::{AllowedOrigins, KioskApi, LoginRateLimiter};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing store traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
