use std::{net::IpAddr, sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use tokio::time::Instant;

use super::client_ip::client_ip;
use crate::error::{ApiError, LOGIN_RATE_LIMITED};

/// Stale windows are dropped once the map grows past this many clients.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    attempts: u32,
}

/// Fixed-window limiter for login attempts, keyed by client address.
///
/// The client address is the peer address unless proxy headers are trusted,
/// see [`client_ip`].
#[derive(Debug, Clone)]
pub struct LoginRateLimiter {
    windows: Arc<DashMap<IpAddr, Window>>,
    max_attempts: u32,
    window: Duration,
    trust_proxy_headers: bool,
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_attempts,
            window,
            trust_proxy_headers: false,
        }
    }

    /// Key on `X-Forwarded-For` / `X-Real-IP`. Only enable this behind a
    /// reverse proxy that overwrites those headers.
    pub fn trust_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }

    /// Count one attempt for `ip`. Returns `false` once the client has used up
    /// its attempts for the current window.
    pub fn try_acquire(&self, ip: IpAddr) -> bool {
        let now = Instant::now();

        if self.windows.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        let mut window = self.windows.entry(ip).or_insert(Window {
            started: now,
            attempts: 0,
        });

        if now.duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                attempts: 0,
            };
        }

        if window.attempts >= self.max_attempts {
            return false;
        }

        window.attempts += 1;
        true
    }

    fn prune(&self, now: Instant) {
        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.window);
    }
}

/// Middleware for `axum::middleware::from_fn_with_state` on the login route.
pub async fn limit_login_attempts(
    State(limiter): State<LoginRateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();
    let ip = client_ip(&parts, limiter.trust_proxy_headers);

    if !limiter.try_acquire(ip) {
        tracing::warn!(%ip, "Login rate limit exceeded");
        return Err(ApiError::TooManyRequests(LOGIN_RATE_LIMITED.to_owned()));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
