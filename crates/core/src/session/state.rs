//! Session state and its transitions.
//!
//! All mutation goes through the methods here. Starting a retrieval clears
//! the error, the selection and the best match, and hands out a ticket;
//! a completion is applied only if its ticket is still the latest one, so
//! a slow response can never overwrite the result of a newer request.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::poetry::{Poem, PoetryDbError, SearchCriteria};
use crate::scorer::{highlight_poem, ScoreEntry, TopK, WordMatcher};

use super::SessionError;

/// Identifies one retrieval. Only the most recently issued ticket is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalTicket(u64);

impl RetrievalTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// State of a browsing session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    loading: bool,
    error: Option<PoetryDbError>,
    poems: Vec<Poem>,
    selected_index: Option<usize>,
    word: String,
    best_match: Option<ScoreEntry>,
    criteria: SearchCriteria,
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&PoetryDbError> {
        self.error.as_ref()
    }

    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn best_match(&self) -> Option<&ScoreEntry> {
        self.best_match.as_ref()
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_word(&mut self, word: impl Into<String>) {
        self.word = word.into();
    }

    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
    }

    /// Matcher for the current word, `None` when it is blank.
    pub fn matcher(&self) -> Option<WordMatcher> {
        WordMatcher::new(&self.word)
    }

    // =========================================================================
    // Retrieval lifecycle
    // =========================================================================

    /// Reset per-result state and issue a new ticket.
    ///
    /// With `show_spinner` off the loading flag is left alone, which is used
    /// for criteria-driven background searches.
    pub fn begin_retrieval(&mut self, show_spinner: bool) -> RetrievalTicket {
        self.error = None;
        self.selected_index = None;
        self.best_match = None;
        if show_spinner {
            self.loading = true;
        }
        self.generation += 1;
        RetrievalTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RetrievalTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Replace the poems with a successful result. Returns false (and
    /// changes nothing) if the ticket is stale.
    pub fn complete_success(&mut self, ticket: RetrievalTicket, poems: Vec<Poem>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.poems = poems;
        self.selected_index = None;
        self.loading = false;
        true
    }

    /// Record a failed retrieval: poems cleared, error set.
    pub fn complete_failure(&mut self, ticket: RetrievalTicket, error: PoetryDbError) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.poems = Vec::new();
        self.selected_index = None;
        self.error = Some(error);
        self.loading = false;
        true
    }

    /// Replace the poems with a ranked subset and point at its best entry.
    pub fn complete_top_k(&mut self, ticket: RetrievalTicket, top: TopK) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.selected_index = if top.poems.is_empty() { None } else { Some(0) };
        self.poems = top.poems;
        self.best_match = Some(top.best);
        self.loading = false;
        true
    }

    fn accept(&self, ticket: RetrievalTicket) -> bool {
        if self.is_current(ticket) {
            true
        } else {
            warn!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding stale retrieval result"
            );
            false
        }
    }

    // =========================================================================
    // Selection and ranking over current poems
    // =========================================================================

    pub fn poem(&self, index: usize) -> Result<&Poem, SessionError> {
        self.poems.get(index).ok_or(SessionError::IndexOutOfRange {
            index,
            len: self.poems.len(),
        })
    }

    /// Select `index`, or clear the selection if it is already selected.
    pub fn toggle_select(&mut self, index: usize) -> Result<Option<usize>, SessionError> {
        self.poem(index)?;
        self.selected_index = if self.selected_index == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.selected_index)
    }

    pub fn clear_best_match(&mut self) {
        self.best_match = None;
    }

    /// Store a ranking result; a real match also becomes the selection.
    pub fn apply_best_match(&mut self, entry: ScoreEntry) {
        if let Some(index) = entry.poem_index.filter(|i| *i < self.poems.len()) {
            self.selected_index = Some(index);
        }
        self.best_match = Some(entry);
    }

    /// Occurrences of the current word in `poem`.
    pub fn count_in_poem(&self, poem: &Poem) -> usize {
        self.matcher().map_or(0, |m| m.count_in_poem(poem))
    }

    /// Escaped text of `poem` with the current word highlighted.
    pub fn highlight(&self, poem: &Poem) -> String {
        highlight_poem(poem, self.matcher().as_ref())
    }

    /// Short description of the current result set.
    pub fn summary(&self) -> String {
        if self.poems.is_empty() {
            return "No results yet.".to_string();
        }
        let authors: HashSet<&str> = self
            .poems
            .iter()
            .map(|p| p.author.as_str())
            .filter(|a| !a.is_empty())
            .collect();
        format!(
            "{} poem{} • {} author{}",
            self.poems.len(),
            plural(self.poems.len()),
            authors.len(),
            plural(authors.len())
        )
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.loading,
            error: self.error.clone(),
            poems: self.poems.clone(),
            selected_index: self.selected_index,
            word: self.word.clone(),
            best_match: self.best_match.clone(),
            criteria: self.criteria.clone(),
            summary: self.summary(),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Point-in-time copy of the session, as handed to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub error: Option<PoetryDbError>,
    pub poems: Vec<Poem>,
    pub selected_index: Option<usize>,
    pub word: String,
    pub best_match: Option<ScoreEntry>,
    pub criteria: SearchCriteria,
    pub summary: String,
}
