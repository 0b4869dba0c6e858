use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref SIGNUP_REQUESTS: Counter =
        register_counter!("waitlist_signup_requests_total", "Total signup requests").unwrap();
    pub static ref SIGNUPS_NEW: Counter =
        register_counter!("waitlist_signups_new_total", "New waitlist signups").unwrap();
    pub static ref SIGNUPS_DUPLICATE: Counter =
        register_counter!("waitlist_signups_duplicate_total", "Signups for emails already on the list").unwrap();
    pub static ref SIGNUP_FAILURES: Counter =
        register_counter!("waitlist_signup_failures_total", "Signups that failed in the store").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("waitlist_rate_limited_total", "Signup requests denied by the rate limiter").unwrap();
    pub static ref RATE_BUCKETS: Gauge =
        register_gauge!("waitlist_rate_buckets", "Client buckets held by the rate limiter").unwrap();
    pub static ref SIGNUP_LATENCY: Histogram = register_histogram!(
        "waitlist_signup_latency_seconds",
        "Signup latency in seconds"
    )
    .unwrap();
    pub static ref PACE_REQUESTS: Counter =
        register_counter!("pace_requests_total", "Total pace calculator requests").unwrap();
}
