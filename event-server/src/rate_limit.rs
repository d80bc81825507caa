//! Per-IP rate limiting for the registration route

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

/// Entries whose window started longer ago than this are purged
const STALE_AFTER: Duration = Duration::from_secs(300);

struct IpEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window counter keyed by client IP
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<HashMap<String, IpEntry>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    /// `max_requests` per `window`; 0 disables limiting
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(&self, ip: &str) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        let entry = map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }

    /// Remove entries older than 5 minutes
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let now = Instant::now();
        map.retain(|_, entry| now.duration_since(entry.window_start) < STALE_AFTER);
    }

    async fn tracked(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Extract client IP: X-Forwarded-For header first, then peer address.
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
    {
        // First entry is the original client
        if let Some(first) = val.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() {
                return ip.to_owned();
            }
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Rate limit middleware for `/register`
pub async fn register_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check(&ip).await {
        tracing::warn!(ip = %ip, "Registration rate limit exceeded");
        return AppError::too_many_requests().into_response();
    }
    next.run(request).await
}

/// Purge stale windows every 5 minutes
pub fn spawn_cleanup(limiter: RateLimiter) {
    if !limiter.is_enabled() {
        return;
    }
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STALE_AFTER);
        loop {
            interval.tick().await;
            limiter.cleanup().await;
            let tracked = limiter.tracked().await;
            tracing::debug!(tracked, "Rate limiter cleanup");
        }
    });
}
