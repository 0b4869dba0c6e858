//! Waitlist signup service and pace calculator.
//!
//! The signup endpoint is guarded by a per-client token bucket
//! ([`rate_limit::RateLimiter`]) and writes to a [`store::SignupStore`].
//! The [`pace`] module solves pace, distance and time from any two of them.

pub mod config;
pub mod email;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod pace;
pub mod rate_limit;
pub mod state;
pub mod store;
