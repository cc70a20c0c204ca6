//! Query state and its shareable page-state representation.
//!
//! `QueryState` is the in-memory selection. `PageState` is the flat
//! string map that survives reloads and sharing (the URL query string).
//! The two convert both ways; a `PageParams` store holds the page side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ConsultationMode, SortOption};

pub const KEY_SEARCH: &str = "search";
pub const KEY_MODE: &str = "mode";
pub const KEY_SPECIALTIES: &str = "specialties";
pub const KEY_SORT: &str = "sort";

/// Canonical key order for query strings.
const KEY_ORDER: [&str; 4] = [KEY_SEARCH, KEY_MODE, KEY_SPECIALTIES, KEY_SORT];

// ═══════════════════════════════════════════════════════════
// QueryState
// ═══════════════════════════════════════════════════════════

/// Current search/filter/sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub consultation_mode: Option<ConsultationMode>,
    /// Insertion-ordered, no duplicates.
    pub selected_specialties: Vec<String>,
    pub sort_option: Option<SortOption>,
}

impl QueryState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Add the specialty if absent, remove it if present.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if let Some(pos) = self.selected_specialties.iter().position(|s| s == specialty) {
            self.selected_specialties.remove(pos);
        } else {
            self.selected_specialties.push(specialty.to_string());
        }
    }

    /// Encode non-default fields only. Specialties are comma-joined, so a
    /// specialty containing a comma does not survive the round trip.
    pub fn to_page_state(&self) -> PageState {
        let mut page = PageState::default();
        if !self.search_text.is_empty() {
            page.insert(KEY_SEARCH, &self.search_text);
        }
        if let Some(mode) = self.consultation_mode {
            page.insert(KEY_MODE, mode.as_str());
        }
        if !self.selected_specialties.is_empty() {
            page.insert(KEY_SPECIALTIES, &self.selected_specialties.join(","));
        }
        if let Some(sort) = self.sort_option {
            page.insert(KEY_SORT, sort.as_str());
        }
        page
    }

    /// Absent keys mean defaults. Unrecognised mode or sort values decode to
    /// `None`; empty and repeated specialty segments are dropped.
    pub fn from_page_state(page: &PageState) -> Self {
        let mut selected_specialties: Vec<String> = Vec::new();
        if let Some(joined) = page.get(KEY_SPECIALTIES) {
            for part in joined.split(',').filter(|s| !s.is_empty()) {
                if !selected_specialties.iter().any(|s| s == part) {
                    selected_specialties.push(part.to_string());
                }
            }
        }

        Self {
            search_text: page.get(KEY_SEARCH).unwrap_or_default().to_string(),
            consultation_mode: page.get(KEY_MODE).and_then(|m| m.parse().ok()),
            selected_specialties,
            sort_option: page.get(KEY_SORT).and_then(|s| s.parse().ok()),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// PageState: flat string map
// ═══════════════════════════════════════════════════════════

/// Shareable page-state representation: string keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageState(BTreeMap<String, String>);

impl PageState {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `search=...&mode=...&specialties=...&sort=...`, form-urlencoded.
    /// Known keys come first in canonical order, any others after.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for key in KEY_ORDER {
            if let Some(value) = self.get(key) {
                serializer.append_pair(key, value);
            }
        }
        for (key, value) in self.iter() {
            if !KEY_ORDER.contains(&key) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Parse a query string, with or without the leading `?`.
    /// For repeated keys the last occurrence wins.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut page = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            page.insert(&key, &value);
        }
        page
    }
}

impl FromIterator<(String, String)> for PageState {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ═══════════════════════════════════════════════════════════
// PageParams: the store behind the page state
// ═══════════════════════════════════════════════════════════

/// Two-way store for the page state (a browser URL, a config value, a test
/// fixture). `replace` swaps the whole map in one step.
pub trait PageParams: Send + Sync {
    fn load(&self) -> PageState;
    fn replace(&mut self, page: PageState);
}

/// In-process page-state store.
#[derive(Debug, Clone, Default)]
pub struct MemoryParams {
    page: PageState,
}

impl MemoryParams {
    pub fn new(page: PageState) -> Self {
        Self { page }
    }

    pub fn from_query_string(query: &str) -> Self {
        Self::new(PageState::from_query_string(query))
    }
}

impl PageParams for MemoryParams {
    fn load(&self) -> PageState {
        self.page.clone()
    }

    fn replace(&mut self, page: PageState) {
        self.page = page;
    }
}
