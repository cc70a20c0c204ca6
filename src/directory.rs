//! Directory state: the loaded record set, the current query, and the
//! derived view handed to the presentation layer.
//!
//! `Directory` is a plain single-owner value. Every transition is a `&mut`
//! call, so transitions never overlap; transports that share it across
//! requests wrap it in a mutex. Derived data is recomputed eagerly on each
//! effective change and cached until the next one:
//! - facets when the record set is replaced
//! - results and suggestions when the record set or the query changes
//!
//! Listeners receive the new `DirectoryView` after every effective change,
//! including load status changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{self, QueryOutcome};
use crate::facets::{self, FacetOption};
use crate::fetch::FetchError;
use crate::models::{ConsultationMode, Practitioner, SortOption};
use crate::query_state::{PageParams, PageState, QueryState};

/// Fetch status as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed { message: String },
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryView {
    pub status: LoadStatus,
    pub query: QueryState,
    /// Page state as a query string, for the address bar.
    pub page_query: String,
    pub total: usize,
    pub results: Vec<Practitioner>,
    pub suggestions: Vec<Practitioner>,
    pub all_specialties: Vec<String>,
    pub facets: Vec<FacetOption>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("No current suggestion with id {0}")]
    UnknownSuggestion(String),
}

/// Identifies one in-flight load. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn Fn(&DirectoryView) + Send + Sync>;

pub struct Directory {
    records: Arc<Vec<Practitioner>>,
    all_specialties: Vec<String>,
    query: QueryState,
    params: Box<dyn PageParams>,
    status: LoadStatus,
    fetched_at: Option<DateTime<Utc>>,
    outcome: QueryOutcome,
    generation: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Directory {
    /// Start empty and loading, with the query read from `params`.
    ///
    /// The store is rewritten in canonical form when it differs, so unknown
    /// values and foreign keys do not outlive the first read.
    pub fn new(mut params: Box<dyn PageParams>) -> Self {
        let initial = params.load();
        let query = QueryState::from_page_state(&initial);
        let canonical = query.to_page_state();
        if canonical != initial {
            params.replace(canonical);
        }
        tracing::debug!(?query, "Directory initialised from page state");
        Self {
            records: Arc::new(Vec::new()),
            all_specialties: Vec::new(),
            query,
            params,
            status: LoadStatus::Loading,
            fetched_at: None,
            outcome: QueryOutcome::default(),
            generation: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    // ── Reads ───────────────────────────────────────────────

    pub fn records(&self) -> &[Practitioner] {
        &self.records
    }

    /// Shared handle to the current record set.
    pub fn record_set(&self) -> Arc<Vec<Practitioner>> {
        Arc::clone(&self.records)
    }

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    pub fn page_state(&self) -> PageState {
        self.params.load()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn filtered_results(&self) -> &[Practitioner] {
        &self.outcome.results
    }

    pub fn suggestions(&self) -> &[Practitioner] {
        &self.outcome.suggestions
    }

    pub fn all_specialties(&self) -> &[String] {
        &self.all_specialties
    }

    pub fn view(&self) -> DirectoryView {
        DirectoryView {
            status: self.status.clone(),
            query: self.query.clone(),
            page_query: self.params.load().to_query_string(),
            total: self.outcome.results.len(),
            results: self.outcome.results.clone(),
            suggestions: self.outcome.suggestions.clone(),
            all_specialties: self.all_specialties.clone(),
            facets: facets::facet_options(&self.all_specialties, &self.query.selected_specialties),
            fetched_at: self.fetched_at,
        }
    }

    // ── Query mutations ─────────────────────────────────────

    pub fn set_search_text(&mut self, text: &str) {
        let mut next = self.query.clone();
        next.search_text = text.to_string();
        self.apply_query(next);
    }

    pub fn set_consultation_mode(&mut self, mode: Option<ConsultationMode>) {
        let mut next = self.query.clone();
        next.consultation_mode = mode;
        self.apply_query(next);
    }

    /// Empty names are ignored; they cannot be encoded in the page state.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if specialty.is_empty() {
            return;
        }
        let mut next = self.query.clone();
        next.toggle_specialty(specialty);
        self.apply_query(next);
    }

    pub fn set_sort_option(&mut self, sort: Option<SortOption>) {
        let mut next = self.query.clone();
        next.sort_option = sort;
        self.apply_query(next);
    }

    /// Reset every field and empty the page state in one step.
    pub fn clear_all_filters(&mut self) {
        let changed = !self.query.is_default();
        self.query = QueryState::default();
        self.params.replace(PageState::default());
        if changed {
            tracing::debug!("All filters cleared");
            self.recompute_outcome();
            self.notify();
        }
    }

    /// Put a suggested practitioner's name into the search box.
    pub fn select_suggestion(&mut self, id: &str) -> Result<(), DirectoryError> {
        let name = self
            .outcome
            .suggestions
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .ok_or_else(|| DirectoryError::UnknownSuggestion(id.to_string()))?;
        self.set_search_text(&name);
        Ok(())
    }

    fn apply_query(&mut self, next: QueryState) {
        if next == self.query {
            return;
        }
        self.query = next;
        self.params.replace(self.query.to_page_state());
        tracing::debug!(query = ?self.query, "Query state changed");
        self.recompute_outcome();
        self.notify();
    }

    // ── Load lifecycle ──────────────────────────────────────

    /// Mark a new load as in flight. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.notify();
        LoadTicket(self.generation)
    }

    /// Apply a load outcome. Stale tickets and cancellations change nothing.
    ///
    /// Success replaces the record set wholesale. Failure empties it and
    /// records the user-facing message.
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Vec<Practitioner>, FetchError>) {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "Stale load ignored");
            return;
        }
        match outcome {
            Ok(records) => {
                self.replace_records(records);
                self.status = LoadStatus::Ready;
                self.fetched_at = Some(Utc::now());
            }
            // Cancellation only comes from shutdown or a newer load; the
            // status intentionally stays `Loading`.
            Err(FetchError::Cancelled) => return,
            Err(e) => {
                self.replace_records(Vec::new());
                self.status = LoadStatus::Failed {
                    message: e.user_message().to_string(),
                };
            }
        }
        self.notify();
    }

    fn replace_records(&mut self, records: Vec<Practitioner>) {
        self.records = Arc::new(records);
        self.all_specialties = facets::extract_specialties(&self.records);
        self.recompute_outcome();
    }

    fn recompute_outcome(&mut self) {
        self.outcome = engine::query(&self.records, &self.query);
    }

    // ── Change notification ─────────────────────────────────

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let view = self.view();
        for (_, listener) in &self.listeners {
            listener(&view);
        }
    }
}
