//! Session API handlers.
//!
//! Retrieval endpoints always answer with the resulting session snapshot.
//! A failed PoetryDB call is part of that snapshot (`error`), not an HTTP
//! error: the request itself was served.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use stanza_core::{PoemView, SearchCriteria, SessionError, SessionSnapshot};
use tracing::debug;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CriteriaRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub exact: bool,
}

impl CriteriaRequest {
    fn into_criteria(self) -> SearchCriteria {
        SearchCriteria::new(self.author.as_deref(), self.title.as_deref(), self.exact)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomRequest {
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WordRequest {
    pub word: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopByWordRequest {
    #[serde(default)]
    pub pool_size: Option<u32>,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn not_found(err: SessionError) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.session().snapshot().await)
}

/// PUT /api/v1/criteria
///
/// Store the criteria and hand them to the debouncer, which runs a silent
/// search once the input settles.
pub async fn update_criteria(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CriteriaRequest>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let criteria = body.into_criteria();
    state.session().set_criteria(criteria.clone()).await;
    if !state.debouncer().push(criteria) {
        debug!("Criteria debouncer is not running");
    }
    (StatusCode::ACCEPTED, Json(state.session().snapshot().await))
}

/// PUT /api/v1/word
pub async fn set_word(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WordRequest>,
) -> Json<SessionSnapshot> {
    state.session().set_word(&body.word).await;
    Json(state.session().snapshot().await)
}

/// POST /api/v1/search
///
/// Filtered search with the criteria in the body, or the stored ones when
/// the body is absent.
pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CriteriaRequest>>,
) -> Json<SessionSnapshot> {
    let snapshot = match body {
        Some(Json(body)) => {
            state
                .session()
                .search_with(body.into_criteria(), true)
                .await
        }
        None => state.session().search(true).await,
    };
    Json(snapshot)
}

/// POST /api/v1/random
pub async fn random(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RandomRequest>>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    if body.count == Some(0) {
        return Err(bad_request("count must be greater than 0"));
    }
    Ok(Json(state.session().random(body.count).await))
}

/// POST /api/v1/top-by-word
pub async fn top_by_word(
    State(state): State<Arc<AppState>>,
    body: Option<Json<TopByWordRequest>>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    if body.pool_size == Some(0) {
        return Err(bad_request("pool_size must be greater than 0"));
    }
    if body.top_k == Some(0) {
        return Err(bad_request("top_k must be greater than 0"));
    }
    Ok(Json(
        state
            .session()
            .top_by_word(body.pool_size, body.top_k)
            .await,
    ))
}

/// POST /api/v1/best-match
pub async fn best_match(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    state.session().find_best_in_current_results().await;
    Json(state.session().snapshot().await)
}

/// POST /api/v1/select/{index}
pub async fn toggle_select(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .session()
        .toggle_select(index)
        .await
        .map_err(not_found)?;
    Ok(Json(state.session().snapshot().await))
}

/// GET /api/v1/poems/{index}
pub async fn get_poem(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<PoemView>, ApiError> {
    state
        .session()
        .poem_view(index)
        .await
        .map(Json)
        .map_err(not_found)
}

/// GET /api/v1/poems/{index}/copy
pub async fn copy_poem(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<CopyResponse>, ApiError> {
    let text = state
        .session()
        .copy_text(index)
        .await
        .map_err(not_found)?;
    Ok(Json(CopyResponse { text }))
}
