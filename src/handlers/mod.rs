mod health;
mod metrics;
mod pace;
mod subscribe;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::state::AppState;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use pace::{pace_handler, unit_handler};
pub use subscribe::subscribe_handler;

// creating the router with routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/subscribe", post(subscribe_handler))
        .route("/api/pace", post(pace_handler))
        .route("/api/pace/unit", post(unit_handler))
        .with_state(state)
}
