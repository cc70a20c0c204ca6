//! Remote record fetch.
//!
//! One GET to the feed, raced against a `CancellationToken`. A non-2xx
//! status, an unreadable body or a non-array payload is a failure; anything
//! inside the array is normalized and never fails.

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::directory::{Directory, LoadTicket};
use crate::models::Practitioner;
use crate::normalize::normalize;

/// Shown when the feed could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load doctors. Please try again.";

/// Shown when the feed parsed but was not a list.
pub const SHAPE_FAILED_MESSAGE: &str = "Invalid data format received from API";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Cannot reach record source: {0}")]
    Network(String),
    #[error("Record source returned HTTP {status}")]
    Status { status: u16 },
    #[error("Record source returned unreadable JSON: {0}")]
    Decode(String),
    #[error("Record source returned {found} instead of an array")]
    Shape { found: &'static str },
    #[error("Fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// The message surfaced to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Shape { .. } => SHAPE_FAILED_MESSAGE,
            _ => FETCH_FAILED_MESSAGE,
        }
    }
}

/// HTTP client for the practitioner feed.
#[derive(Debug, Clone)]
pub struct RecordClient {
    source_url: String,
    client: reqwest::Client,
}

impl RecordClient {
    pub fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetch and normalize the feed. Returns `Cancelled` as soon as the
    /// token fires, dropping the in-flight request.
    pub async fn fetch(&self, cancel: &CancellationToken) -> Result<Vec<Practitioner>, FetchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.fetch_uncancelled() => result,
        }
    }

    async fn fetch_uncancelled(&self) -> Result<Vec<Practitioner>, FetchError> {
        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        parse_payload(payload)
    }
}

/// Accept only a JSON array; normalize its elements.
pub fn parse_payload(payload: Value) -> Result<Vec<Practitioner>, FetchError> {
    match payload {
        Value::Array(items) => Ok(normalize(items)),
        other => Err(FetchError::Shape {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Run one full load against `directory`: open a ticket, fetch, then hand
/// the outcome back. A newer load or a cancellation makes this a no-op.
pub async fn load_into(
    directory: &std::sync::Mutex<Directory>,
    client: &RecordClient,
    cancel: &CancellationToken,
) {
    let ticket = match directory.lock() {
        Ok(mut dir) => dir.begin_load(),
        Err(_) => {
            tracing::error!("Directory lock poisoned; load skipped");
            return;
        }
    };
    complete_load(directory, ticket, client, cancel).await;
}

/// Second half of a load whose ticket was already issued.
pub async fn complete_load(
    directory: &std::sync::Mutex<Directory>,
    ticket: LoadTicket,
    client: &RecordClient,
    cancel: &CancellationToken,
) {
    tracing::info!(source = client.source_url(), "Fetching practitioner records");
    let outcome = client.fetch(cancel).await;

    match &outcome {
        Ok(records) => tracing::info!(count = records.len(), "Practitioner records fetched"),
        Err(FetchError::Cancelled) => tracing::info!("Practitioner fetch cancelled"),
        Err(e) => tracing::warn!(error = %e, "Practitioner fetch failed"),
    }

    match directory.lock() {
        Ok(mut dir) => dir.finish_load(ticket, outcome),
        Err(_) => tracing::error!("Directory lock poisoned; load result dropped"),
    }
}
