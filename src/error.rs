//! Error types for the waitlist service and the pace calculator.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pace::Field;

/// A field of the pace calculator that can't be used as entered.
///
/// Both variants are shown next to the offending field; neither stops the
/// other fields from being parsed or displayed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaceError {
    /// Text does not match the field's grammar
    #[error("{field} is not in a recognised format: {input:?}")]
    InvalidFormat { field: Field, input: String },

    /// Text parses but the value can't be used
    #[error("{field} {reason}")]
    InvalidInput { field: Field, reason: &'static str },
}

impl PaceError {
    pub fn field(&self) -> Field {
        match self {
            PaceError::InvalidFormat { field, .. } | PaceError::InvalidInput { field, .. } => *field,
        }
    }
}

/// Failures reported by a signup store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The email is already on the list
    #[error("email is already subscribed")]
    Duplicate,

    /// The store answered but refused the insert
    #[error("store rejected insert (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The store could not be reached or its reply could not be read
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced to HTTP clients as `{"error": ...}` bodies.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("Too many requests")]
    RateLimited,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Database error")]
    Database,

    #[error("Server error")]
    Server,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InvalidEmail => StatusCode::BAD_REQUEST,
            ApiError::Database | ApiError::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
