//! Doctor list endpoints.
//!
//! Three endpoints:
//! - `GET /api/doctors`: the current directory view
//! - `GET /api/doctors/search`: evaluate a shared page-state query string
//! - `POST /api/doctors/reload`: refetch the record set

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::directory::{DirectoryView, LoadStatus};
use crate::engine;
use crate::models::Practitioner;
use crate::query_state::{PageState, QueryState};

/// `GET /api/doctors`: everything the list screen renders.
pub async fn view(State(ctx): State<ApiContext>) -> Result<Json<DirectoryView>, ApiError> {
    let dir = ctx.lock_directory()?;
    Ok(Json(dir.view()))
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub status: LoadStatus,
    pub query: QueryState,
    pub page_query: String,
    pub total: usize,
    pub results: Vec<Practitioner>,
    pub suggestions: Vec<Practitioner>,
    pub all_specialties: Vec<String>,
}

/// `GET /api/doctors/search?search=&mode=&specialties=&sort=`: results for a
/// bookmarked or shared link, without touching the live query state.
pub async fn search(
    State(ctx): State<ApiContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let page: PageState = params.into_iter().collect();
    let query = QueryState::from_page_state(&page);

    let (status, records, all_specialties) = {
        let dir = ctx.lock_directory()?;
        (dir.status().clone(), dir.record_set(), dir.all_specialties().to_vec())
    };

    let outcome = engine::query(&records, &query);

    Ok(Json(SearchResponse {
        status,
        page_query: query.to_page_state().to_query_string(),
        query,
        total: outcome.results.len(),
        results: outcome.results,
        suggestions: outcome.suggestions,
        all_specialties,
    }))
}

/// `POST /api/doctors/reload`: cancel any in-flight fetch and start a new one.
pub async fn reload(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<DirectoryView>), ApiError> {
    ctx.spawn_load()?;
    let dir = ctx.lock_directory()?;
    Ok((StatusCode::ACCEPTED, Json(dir.view())))
}
