//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::directory::LoadStatus;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub load: LoadStatus,
    pub record_count: usize,
    pub version: &'static str,
}

/// `GET /api/health`: connection check for the front end.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let dir = ctx.lock_directory()?;

    Ok(Json(HealthResponse {
        status: "ok",
        load: dir.status().clone(),
        record_count: dir.records().len(),
        version: crate::config::APP_VERSION,
    }))
}
