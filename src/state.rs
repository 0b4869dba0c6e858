use std::sync::Arc;
use crate::rate_limit::RateLimiter;
use crate::store::SignupStore;
// app's shared state

pub struct AppState {
    pub rate_limiter: RateLimiter,  // per-client buckets for the signup endpoint
    pub store: Arc<dyn SignupStore>,
}

impl AppState {
    pub fn new(rate_limiter: RateLimiter, store: Arc<dyn SignupStore>) -> Self {
        Self { rate_limiter, store }
    }
}
