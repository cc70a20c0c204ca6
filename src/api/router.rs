//! Directory API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the directory API router.
///
/// The front end is served from a different origin, so CORS is permissive.
pub fn directory_api_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/doctors", get(endpoints::doctors::view))
        .route("/doctors/search", get(endpoints::doctors::search))
        .route("/doctors/reload", post(endpoints::doctors::reload))
        .route("/query", axum::routing::delete(endpoints::query::clear_all))
        .route("/query/search", put(endpoints::query::set_search_text))
        .route("/query/mode", put(endpoints::query::set_mode))
        .route(
            "/query/specialties/toggle",
            post(endpoints::query::toggle_specialty),
        )
        .route("/query/sort", put(endpoints::query::set_sort))
        .route(
            "/suggestions/:id/select",
            post(endpoints::query::select_suggestion),
        )
        .with_state(ctx);

    Router::new().nest("/api", api).layer(CorsLayer::permissive())
}
