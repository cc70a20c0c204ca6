//! Shared types for the HTTP transport.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::error::ApiError;
use crate::directory::{Directory, LoadTicket};
use crate::fetch::{self, RecordClient};

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
///
/// The directory sits behind a mutex so each request is one discrete,
/// non-overlapping transition. At most one fetch is live; starting a new
/// one cancels the previous token.
#[derive(Clone)]
pub struct ApiContext {
    pub directory: Arc<Mutex<Directory>>,
    pub client: RecordClient,
    inflight: Arc<Mutex<CancellationToken>>,
}

impl ApiContext {
    pub fn new(directory: Directory, client: RecordClient) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
            client,
            inflight: Arc::new(Mutex::new(CancellationToken::new())),
        }
    }

    pub fn lock_directory(&self) -> Result<MutexGuard<'_, Directory>, ApiError> {
        self.directory
            .lock()
            .map_err(|_| ApiError::Internal("directory lock poisoned".into()))
    }

    /// Cancel any in-flight fetch and start a fresh one in the background.
    ///
    /// The directory enters `Loading` before this returns.
    pub fn spawn_load(&self) -> Result<JoinHandle<()>, ApiError> {
        let (ticket, token) = self.issue_load()?;
        let directory = Arc::clone(&self.directory);
        let client = self.client.clone();

        Ok(tokio::spawn(async move {
            fetch::complete_load(&directory, ticket, &client, &token).await;
        }))
    }

    /// Install a fresh token and open its ticket in one critical section.
    ///
    /// Lock order is `inflight` then `directory`, so the live token always
    /// belongs to the current ticket and every cancelled token to a stale one.
    fn issue_load(&self) -> Result<(LoadTicket, CancellationToken), ApiError> {
        let mut current = self
            .inflight
            .lock()
            .map_err(|_| ApiError::Internal("fetch token lock poisoned".into()))?;
        let ticket = self.lock_directory()?.begin_load();
        let token = CancellationToken::new();
        let previous = std::mem::replace(&mut *current, token.clone());
        previous.cancel();
        Ok((ticket, token))
    }

    /// Cancel the in-flight fetch, if any. Used on shutdown.
    pub fn cancel_load(&self) {
        if let Ok(current) = self.inflight.lock() {
            current.cancel();
        }
    }
}
