use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware::metrics_middleware, session};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Session state and inputs
        .route("/state", get(session::get_state))
        .route("/criteria", put(session::update_criteria))
        .route("/word", put(session::set_word))
        // Retrievals
        .route("/search", post(session::search))
        .route("/random", post(session::random))
        .route("/top-by-word", post(session::top_by_word))
        // Current results
        .route("/best-match", post(session::best_match))
        .route("/select/{index}", post(session::toggle_select))
        .route("/poems/{index}", get(session::get_poem))
        .route("/poems/{index}/copy", get(session::copy_poem))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
