use axum::http::HeaderMap;
use dashmap::DashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_CAPACITY: u32 = 5;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(600);

/// Key shared by every client whose address can't be determined.
pub const UNKNOWN_CLIENT: &str = "ip:unknown";

// Token bucket - one per client key
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    pub tokens: f64,
    pub updated_at: Instant,
}

/// Per-client token buckets refilling linearly at `capacity / window`.
///
/// Buckets are created on first use and kept for the life of the limiter.
pub struct RateLimiter {
    buckets: DashMap<String, Bucket>,
    capacity: f64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            buckets: DashMap::new(),
            capacity: f64::from(capacity),
            window: window.max(Duration::from_millis(1)),
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Takes one token for `key` if one is available.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Same as [`allow`](Self::allow) with an explicit clock reading.
    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        // the entry guard holds the shard lock for the whole read-modify-write
        let mut bucket = self.buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: self.capacity,
            updated_at: now,
        });

        let elapsed = now.saturating_duration_since(bucket.updated_at);
        let refill = elapsed.as_secs_f64() * self.capacity / self.window.as_secs_f64();
        let tokens = (bucket.tokens + refill).min(self.capacity);
        let allowed = tokens >= 1.0;

        bucket.tokens = if allowed { tokens - 1.0 } else { tokens };
        bucket.updated_at = now;

        if !allowed {
            debug!(key, tokens, "Rate limit exceeded");
        }
        allowed
    }

    /// Tokens left in `key`'s bucket as of its last evaluation.
    pub fn tokens(&self, key: &str) -> Option<f64> {
        self.buckets.get(key).map(|bucket| bucket.tokens)
    }

    // Number of client buckets held
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_WINDOW)
    }
}

/// Rate limit key for a request: first `x-forwarded-for` entry, else the
/// peer address, else [`UNKNOWN_CLIENT`].
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => format!("ip:{ip}"),
        (None, Some(addr)) => format!("ip:{}", addr.ip()),
        (None, None) => UNKNOWN_CLIENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_allows_capacity_then_denies() {
        let limiter = RateLimiter::default();
        let now = Instant::now();

        for i in 0..5 {
            assert!(limiter.allow_at("ip:1.2.3.4", now), "request {i} should pass");
        }
        assert!(!limiter.allow_at("ip:1.2.3.4", now));
        assert_eq!(limiter.tokens("ip:1.2.3.4"), Some(0.0));
    }

    #[test]
    fn test_refills_one_token_per_window_share() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        for _ in 0..5 {
            limiter.allow_at("early", start);
            limiter.allow_at("on-time", start);
        }

        // 600s / 5 tokens = one token every 120s
        assert!(!limiter.allow_at("early", start + Duration::from_secs(119)));

        let later = start + Duration::from_secs(120);
        assert!(limiter.allow_at("on-time", later));
        assert!(!limiter.allow_at("on-time", later));
    }

    #[test]
    fn test_denied_request_does_not_spend_tokens() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.allow_at("k", start));

        let t = start + Duration::from_secs(5);
        assert!(!limiter.allow_at("k", t));
        assert_eq!(limiter.tokens("k"), Some(0.5));

        assert!(limiter.allow_at("k", start + Duration::from_secs(10)));
    }

    #[test]
    fn test_tokens_stay_within_bounds() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        let mut now = start;

        for step in 0..200u64 {
            now += Duration::from_secs(step % 7 * 13);
            limiter.allow_at("k", now);
            let tokens = limiter.tokens("k").unwrap();
            assert!((0.0..=limiter.capacity()).contains(&tokens));
        }

        limiter.allow_at("k", now + Duration::from_secs(86_400));
        assert_eq!(limiter.tokens("k"), Some(4.0));
    }

    #[test]
    fn test_clock_going_backwards_adds_nothing() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let later = Instant::now() + Duration::from_secs(30);
        assert!(limiter.allow_at("k", later));
        assert!(!limiter.allow_at("k", later - Duration::from_secs(30)));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.allow_at("ip:a", now));
        assert!(!limiter.allow_at("ip:a", now));
        assert!(limiter.allow_at("ip:b", now));
        assert_eq!(limiter.len(), 2);
    }

    #[test]
    fn test_concurrent_callers_never_overspend() {
        let limiter = RateLimiter::default();
        let now = Instant::now();
        let allowed = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..10 {
                        if limiter.allow_at("shared", now) {
                            allowed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(allowed.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 203.0.113.9 , 10.0.0.1"),
        );
        let peer: SocketAddr = "10.0.0.2:5555".parse().unwrap();
        assert_eq!(client_key(&headers, Some(peer)), "ip:203.0.113.9");
    }

    #[test]
    fn test_client_key_falls_back_to_peer_then_unknown() {
        let peer: SocketAddr = "10.0.0.2:5555".parse().unwrap();
        assert_eq!(client_key(&HeaderMap::new(), Some(peer)), "ip:10.0.0.2");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" ,1.1.1.1"));
        assert_eq!(client_key(&headers, None), UNKNOWN_CLIENT);
        assert_eq!(client_key(&HeaderMap::new(), None), UNKNOWN_CLIENT);
    }
}
