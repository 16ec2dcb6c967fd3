pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::achievements::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/achievements/deduplicate",
            post(handlers::handle_deduplicate),
        )
        .route(
            "/api/v1/achievements/similarity",
            post(handlers::handle_similarity),
        )
        .fallback(not_found)
        .with_state(state)
}
