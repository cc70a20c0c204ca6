//! Query state endpoints: one per presentation-layer interaction.
//!
//! Each returns the new `DirectoryView` so the front end re-renders from a
//! single response.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::directory::DirectoryView;
use crate::models::{ConsultationMode, SortOption};

#[derive(Deserialize)]
pub struct SearchTextBody {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ModeBody {
    pub mode: Option<String>,
}

#[derive(Deserialize)]
pub struct SpecialtyBody {
    pub specialty: String,
}

#[derive(Deserialize)]
pub struct SortBody {
    pub sort: Option<String>,
}

/// `PUT /api/query/search`
pub async fn set_search_text(
    State(ctx): State<ApiContext>,
    Json(body): Json<SearchTextBody>,
) -> Result<Json<DirectoryView>, ApiError> {
    let mut dir = ctx.lock_directory()?;
    dir.set_search_text(&body.text);
    Ok(Json(dir.view()))
}

/// `PUT /api/query/mode`: `null` clears the filter.
pub async fn set_mode(
    State(ctx): State<ApiContext>,
    Json(body): Json<ModeBody>,
) -> Result<Json<DirectoryView>, ApiError> {
    let mode = body
        .mode
        .as_deref()
        .map(str::parse::<ConsultationMode>)
        .transpose()?;
    let mut dir = ctx.lock_directory()?;
    dir.set_consultation_mode(mode);
    Ok(Json(dir.view()))
}

/// `POST /api/query/specialties/toggle`
pub async fn toggle_specialty(
    State(ctx): State<ApiContext>,
    Json(body): Json<SpecialtyBody>,
) -> Result<Json<DirectoryView>, ApiError> {
    if body.specialty.is_empty() {
        return Err(ApiError::BadRequest("Specialty must not be empty".into()));
    }
    let mut dir = ctx.lock_directory()?;
    dir.toggle_specialty(&body.specialty);
    Ok(Json(dir.view()))
}

/// `PUT /api/query/sort`: `null` restores source order.
pub async fn set_sort(
    State(ctx): State<ApiContext>,
    Json(body): Json<SortBody>,
) -> Result<Json<DirectoryView>, ApiError> {
    let sort = body
        .sort
        .as_deref()
        .map(str::parse::<SortOption>)
        .transpose()?;
    let mut dir = ctx.lock_directory()?;
    dir.set_sort_option(sort);
    Ok(Json(dir.view()))
}

/// `DELETE /api/query`
pub async fn clear_all(State(ctx): State<ApiContext>) -> Result<Json<DirectoryView>, ApiError> {
    let mut dir = ctx.lock_directory()?;
    dir.clear_all_filters();
    Ok(Json(dir.view()))
}

/// `POST /api/suggestions/:id/select`
pub async fn select_suggestion(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DirectoryView>, ApiError> {
    let mut dir = ctx.lock_directory()?;
    dir.select_suggestion(&id)?;
    Ok(Json(dir.view()))
}
