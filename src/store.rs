//! Waitlist storage.
//!
//! The production store is a Supabase (PostgREST) table with a unique
//! constraint on `email`; a unique violation comes back as Postgres error
//! code `23505` and is reported as [`StoreError::Duplicate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;

/// Postgres `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

#[async_trait]
pub trait SignupStore: Send + Sync {
    /// Adds `email` to the waitlist, failing with [`StoreError::Duplicate`]
    /// when it is already there.
    async fn insert(&self, email: &str) -> Result<(), StoreError>;

    /// Short name used in logs and the health endpoint.
    fn kind(&self) -> &'static str;
}

#[derive(Serialize)]
struct NewSignup<'a> {
    email: &'a str,
}

// Error body returned by PostgREST
#[derive(Deserialize, Default, Debug)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

impl PostgrestError {
    fn is_duplicate(&self) -> bool {
        self.code.as_deref() == Some(UNIQUE_VIOLATION)
            || self
                .message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains("duplicate"))
    }
}

/// Inserts rows through the Supabase REST API using the service role key.
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(client: reqwest::Client, base_url: &str, service_key: &str, table: &str) -> Self {
        let endpoint = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
        Self {
            client,
            endpoint,
            service_key: service_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SignupStore for SupabaseStore {
    async fn insert(&self, email: &str) -> Result<(), StoreError> {
        let res = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(&NewSignup { email })
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let body = res.text().await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let error: PostgrestError = serde_json::from_str(&body).unwrap_or_default();
        debug!(status = status.as_u16(), code = ?error.code, "Supabase insert failed");

        if error.is_duplicate() {
            return Err(StoreError::Duplicate);
        }
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message: error.message.unwrap_or(body),
        })
    }

    fn kind(&self) -> &'static str {
        "supabase"
    }
}

/// Keeps signups in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    signups: DashMap<String, DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_up_at(&self, email: &str) -> Option<DateTime<Utc>> {
        self.signups.get(email).map(|at| *at)
    }

    pub fn len(&self) -> usize {
        self.signups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signups.is_empty()
    }
}

#[async_trait]
impl SignupStore for MemoryStore {
    async fn insert(&self, email: &str) -> Result<(), StoreError> {
        match self.signups.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(Utc::now());
                Ok(())
            }
        }
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
