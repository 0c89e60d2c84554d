//! Search orchestrator.
//!
//! Drives the three retrieval modes against a [`PoetrySource`] and applies
//! their outcomes to the shared [`SessionState`]:
//! - **Filtered search**: author/title query, decoded result replaces poems
//! - **Random fetch**: `count` random poems replace poems
//! - **Top by word**: a random pool is scored and cut down to the top K

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::metrics::{POOL_SURVIVORS, RETRIEVALS};
use crate::poetry::{Poem, PoetryDbError, PoetrySource, SearchCriteria};
use crate::scorer::{best_match, top_k_by_word, ScoreEntry, WordMatcher};

use super::config::SessionConfig;
use super::state::{RetrievalTicket, SessionSnapshot, SessionState};
use super::SessionError;

/// A poem of the current result set, prepared for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PoemView {
    pub index: usize,
    pub poem: Poem,
    pub selected: bool,
    pub count: usize,
    pub highlighted: String,
}

/// Owns the session state and runs retrievals against it.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct SearchOrchestrator {
    source: Arc<dyn PoetrySource>,
    config: SessionConfig,
    state: Arc<RwLock<SessionState>>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn PoetrySource>, config: SessionConfig) -> Self {
        Self {
            source,
            config,
            state: Arc::new(RwLock::new(SessionState::new())),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn set_criteria(&self, criteria: SearchCriteria) {
        self.state.write().await.set_criteria(criteria);
    }

    pub async fn set_word(&self, word: &str) {
        self.state.write().await.set_word(word);
    }

    // =========================================================================
    // Retrievals
    // =========================================================================

    /// Filtered search with the stored criteria.
    pub async fn search(&self, show_spinner: bool) -> SessionSnapshot {
        let (ticket, criteria) = {
            let mut state = self.state.write().await;
            (state.begin_retrieval(show_spinner), state.criteria().clone())
        };
        self.run_search(ticket, criteria).await
    }

    /// Store `criteria` and run a filtered search with it.
    pub async fn search_with(&self, criteria: SearchCriteria, show_spinner: bool) -> SessionSnapshot {
        let ticket = {
            let mut state = self.state.write().await;
            state.set_criteria(criteria.clone());
            state.begin_retrieval(show_spinner)
        };
        self.run_search(ticket, criteria).await
    }

    async fn run_search(&self, ticket: RetrievalTicket, criteria: SearchCriteria) -> SessionSnapshot {
        debug!(generation = ticket.generation(), ?criteria, "Starting filtered search");
        let result = self.source.search(&criteria).await;
        self.finish("search", ticket, result).await
    }

    /// Fetch `count` random poems (configured default when `None`).
    pub async fn random(&self, count: Option<u32>) -> SessionSnapshot {
        let count = count.unwrap_or(self.config.random_count);
        let ticket = self.state.write().await.begin_retrieval(true);
        debug!(generation = ticket.generation(), count, "Starting random fetch");

        let result = self.source.random(count).await;
        self.finish("random", ticket, result).await
    }

    /// Fetch a random pool, keep the `top_k` poems with the most occurrences
    /// of the current word.
    ///
    /// With a blank word nothing is fetched; the best match is cleared.
    pub async fn top_by_word(&self, pool_size: Option<u32>, top_k: Option<usize>) -> SessionSnapshot {
        let pool_size = pool_size.unwrap_or(self.config.pool_size);
        let top_k = top_k.unwrap_or(self.config.top_k);

        let (ticket, matcher) = {
            let mut state = self.state.write().await;
            let Some(matcher) = state.matcher() else {
                state.clear_best_match();
                return state.snapshot();
            };
            (state.begin_retrieval(true), matcher)
        };
        debug!(
            generation = ticket.generation(),
            word = matcher.word(),
            pool_size,
            top_k,
            "Starting top-by-word fetch"
        );

        let result = self.source.random(pool_size).await;

        let mut state = self.state.write().await;
        let applied = match result {
            Ok(pool) => {
                let pool_len = pool.len();
                let top = top_k_by_word(pool, &matcher, top_k);
                POOL_SURVIVORS.observe(top.poems.len() as f64);
                info!(
                    word = matcher.word(),
                    pool = pool_len,
                    kept = top.poems.len(),
                    best = top.best.count,
                    "Ranked random pool"
                );
                let applied = state.complete_top_k(ticket, top);
                record_outcome("top_by_word", applied, true);
                applied
            }
            Err(e) => {
                warn!("Top-by-word fetch failed: {}", e);
                let applied = state.complete_failure(ticket, e);
                record_outcome("top_by_word", applied, false);
                applied
            }
        };
        if !applied {
            debug!(generation = ticket.generation(), "Top-by-word result superseded");
        }
        state.snapshot()
    }

    async fn finish(
        &self,
        mode: &str,
        ticket: RetrievalTicket,
        result: Result<Vec<Poem>, PoetryDbError>,
    ) -> SessionSnapshot {
        let mut state = self.state.write().await;
        match result {
            Ok(poems) => {
                let count = poems.len();
                let applied = state.complete_success(ticket, poems);
                if applied {
                    info!(mode = mode, poems = count, "Retrieval succeeded");
                }
                record_outcome(mode, applied, true);
            }
            Err(e) => {
                warn!(mode = mode, "Retrieval failed: {}", e);
                let applied = state.complete_failure(ticket, e);
                record_outcome(mode, applied, false);
            }
        }
        state.snapshot()
    }

    // =========================================================================
    // Operations over the current result set
    // =========================================================================

    /// Rank the loaded poems by the current word.
    ///
    /// A winner becomes the selection. With no match the no-match entry is
    /// stored and the selection is left alone; with a blank word the best
    /// match is cleared and `None` returned.
    pub async fn find_best_in_current_results(&self) -> Option<ScoreEntry> {
        let mut state = self.state.write().await;
        if state.matcher().is_none() {
            state.clear_best_match();
            return None;
        }
        let entry = best_match(state.poems(), state.word());
        state.apply_best_match(entry.clone());
        Some(entry)
    }

    pub async fn toggle_select(&self, index: usize) -> Result<Option<usize>, SessionError> {
        self.state.write().await.toggle_select(index)
    }

    /// Occurrences of the current word in poem `index`.
    pub async fn count_in_poem(&self, index: usize) -> Result<usize, SessionError> {
        let state = self.state.read().await;
        let poem = state.poem(index)?;
        Ok(state.count_in_poem(poem))
    }

    /// Escaped, highlighted text of poem `index`.
    pub async fn highlight(&self, index: usize) -> Result<String, SessionError> {
        let state = self.state.read().await;
        let poem = state.poem(index)?;
        Ok(state.highlight(poem))
    }

    pub async fn poem_view(&self, index: usize) -> Result<PoemView, SessionError> {
        let state = self.state.read().await;
        let poem = state.poem(index)?;
        let matcher: Option<WordMatcher> = state.matcher();
        Ok(PoemView {
            index,
            poem: poem.clone(),
            selected: state.selected_index() == Some(index),
            count: matcher.as_ref().map_or(0, |m| m.count_in_poem(poem)),
            highlighted: state.highlight(poem),
        })
    }

    pub async fn copy_text(&self, index: usize) -> Result<String, SessionError> {
        let state = self.state.read().await;
        Ok(state.poem(index)?.copy_text())
    }
}

fn record_outcome(mode: &str, applied: bool, ok: bool) {
    let outcome = match (applied, ok) {
        (false, _) => "stale",
        (true, true) => "success",
        (true, false) => "failure",
    };
    RETRIEVALS.with_label_values(&[mode, outcome]).inc();
}
