// src/services/rate_limit.rs
// DOCUMENTATION: Per-client-IP request rate limiting
// PURPOSE: Cap requests per IP over a sliding window (100 per 15 minutes by default)

use crate::errors::GatewayError;
use actix_web::HttpRequest;
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Keyed GCRA limiter
/// DOCUMENTATION: Each IP may burst up to `max_requests`; capacity refills
/// evenly across `window`.
pub struct IpRateLimiter {
    limiter: KeyedLimiter,
}

impl IpRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Consume one request from `ip`'s budget
    pub fn check(&self, ip: IpAddr) -> Result<(), GatewayError> {
        self.limiter.check_key(&ip).map_err(|_| {
            log::warn!("Rate limit exceeded for {}", ip);
            GatewayError::RateLimitExceeded
        })
    }

    /// Consume one request from the peer's budget
    /// Requests without a peer address share a single bucket.
    pub fn check_request(&self, req: &HttpRequest) -> Result<(), GatewayError> {
        let ip = req
            .peer_addr()
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        self.check(ip)
    }

    /// Forget clients whose budget has fully refilled
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of client IPs currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Background task to periodically drop idle limiter entries
pub fn start_cleanup_task(limiter: Arc<IpRateLimiter>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));
        loop {
            interval.tick().await;
            limiter.cleanup();
            log::debug!(
                "Rate limiter cleanup: {} clients tracked",
                limiter.tracked_clients()
            );
        }
    });
}
