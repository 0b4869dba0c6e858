use axum::{
    Json,
    body::to_bytes,
    extract::{ConnectInfo, Request, State},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::email::{email_digest, is_valid_email};
use crate::error::{ApiError, StoreError};
use crate::metrics::{
    RATE_BUCKETS, RATE_LIMITED, SIGNUP_FAILURES, SIGNUP_LATENCY, SIGNUP_REQUESTS, SIGNUPS_DUPLICATE,
    SIGNUPS_NEW,
};
use crate::models::{SubscribeRequest, SubscribeResponse, SubscribeStatus};
use crate::rate_limit::client_key;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 16 * 1024;

// Rate limit check, then body validation, then the store insert
pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SubscribeResponse>, ApiError> {
    SIGNUP_REQUESTS.inc();
    let start_time = Instant::now();

    let (parts, body) = request.into_parts();
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(&parts.headers, peer);

    let allowed = state.rate_limiter.allow(&client);
    RATE_BUCKETS.set(state.rate_limiter.len() as f64);
    if !allowed {
        RATE_LIMITED.inc();
        info!(%client, "Signup rate limited");
        return Err(ApiError::RateLimited);
    }

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| ApiError::InvalidEmail)?;
    let email = serde_json::from_slice::<SubscribeRequest>(&bytes)
        .ok()
        .map(|req| req.email)
        .filter(|email| is_valid_email(email))
        .ok_or(ApiError::InvalidEmail)?;
    let digest = email_digest(&email);

    let status = match state.store.insert(&email).await {
        Ok(()) => {
            SIGNUPS_NEW.inc();
            info!(email = %digest, "New waitlist signup");
            SubscribeStatus::Subscribed
        }
        Err(StoreError::Duplicate) => {
            SIGNUPS_DUPLICATE.inc();
            info!(email = %digest, "Email already on the waitlist");
            SubscribeStatus::AlreadySubscribed
        }
        Err(e @ StoreError::Rejected { .. }) => {
            SIGNUP_FAILURES.inc();
            error!(email = %digest, error = %e, "Signup insert rejected");
            return Err(ApiError::Database);
        }
        Err(e @ StoreError::Unavailable(_)) => {
            SIGNUP_FAILURES.inc();
            warn!(email = %digest, error = %e, store = state.store.kind(), "Signup store unavailable");
            return Err(ApiError::Server);
        }
    };

    SIGNUP_LATENCY.observe(start_time.elapsed().as_secs_f64());
    Ok(Json(SubscribeResponse { status }))
}
