//! Mock poetry source for testing.

use async_trait::async_trait;
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::poetry::{normalize, Poem, PoetryDbError, PoetrySource, QueryBuilder, SearchCriteria};

/// A recorded call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Search { criteria: SearchCriteria, url: String },
    Random { count: u32 },
}

/// A response queued ahead of the default behavior.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub result: Result<Vec<Poem>, PoetryDbError>,
    pub delay: Duration,
}

/// Mock implementation of the PoetrySource trait.
///
/// Provides controllable behavior for testing:
/// - Serve searches and random samples from an in-memory library
/// - Track calls for assertions
/// - Simulate failures and slow responses
///
/// # Example
///
/// ```rust,ignore
/// use stanza_core::testing::{MockPoetrySource, fixtures};
///
/// let source = MockPoetrySource::with_poems(fixtures::library());
/// source.set_next_error(fixtures::server_error("/author/frost")).await;
///
/// assert!(source.search(&criteria).await.is_err());
/// assert!(source.search(&criteria).await.is_ok());
/// ```
#[derive(Debug)]
pub struct MockPoetrySource {
    /// Library served by default.
    poems: Arc<RwLock<Vec<Poem>>>,
    /// Responses returned before falling back to the library, in order.
    scripted: Arc<RwLock<VecDeque<ScriptedResponse>>>,
    /// Delay applied to default responses.
    delay: Arc<RwLock<Duration>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<PoetryDbError>>>,
    queries: QueryBuilder,
}

impl Default for MockPoetrySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPoetrySource {
    /// Create a mock with an empty library.
    pub fn new() -> Self {
        Self::with_poems(Vec::new())
    }

    /// Create a mock serving the given library.
    pub fn with_poems(poems: Vec<Poem>) -> Self {
        Self {
            poems: Arc::new(RwLock::new(poems)),
            scripted: Arc::new(RwLock::new(VecDeque::new())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            queries: QueryBuilder::default(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the library.
    pub async fn set_poems(&self, poems: Vec<Poem>) {
        *self.poems.write().await = poems;
    }

    /// Delay every default response by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Queue a response for the next call that has no earlier script.
    pub async fn push_response(&self, result: Result<Vec<Poem>, PoetryDbError>, delay: Duration) {
        self.scripted
            .write()
            .await
            .push_back(ScriptedResponse { result, delay });
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: PoetryDbError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }

    /// Error or script to use for this call, if any.
    async fn take_override(&self) -> Option<ScriptedResponse> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(ScriptedResponse {
                result: Err(err),
                delay: Duration::ZERO,
            });
        }
        self.scripted.write().await.pop_front()
    }

    async fn respond(
        &self,
        default: impl FnOnce(&[Poem]) -> Vec<Poem>,
    ) -> Result<Vec<Poem>, PoetryDbError> {
        if let Some(scripted) = self.take_override().await {
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            return scripted.result;
        }

        let delay = *self.delay.read().await;
        let result = {
            let poems = self.poems.read().await;
            default(poems.as_slice())
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(result)
    }
}

fn field_matches(value: &str, wanted: Option<&String>, exact: bool) -> bool {
    match wanted {
        None => true,
        Some(w) if exact => value == w,
        Some(w) => value.to_lowercase().contains(w.as_str()),
    }
}

#[async_trait]
impl PoetrySource for MockPoetrySource {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Poem>, PoetryDbError> {
        self.record(RecordedCall::Search {
            criteria: criteria.clone(),
            url: self.queries.search_url(criteria),
        })
        .await;

        let author = normalize(criteria.author.as_deref(), !criteria.exact);
        let title = normalize(criteria.title.as_deref(), !criteria.exact);
        let exact = criteria.exact;

        self.respond(|poems| {
            if author.is_none() && title.is_none() {
                let authors: BTreeSet<&str> = poems.iter().map(|p| p.author.as_str()).collect();
                return authors.into_iter().map(Poem::author_listing).collect();
            }
            poems
                .iter()
                .filter(|p| field_matches(&p.author, author.as_ref(), exact))
                .filter(|p| field_matches(&p.title, title.as_ref(), exact))
                .cloned()
                .collect()
        })
        .await
    }

    async fn random(&self, count: u32) -> Result<Vec<Poem>, PoetryDbError> {
        self.record(RecordedCall::Random { count }).await;

        self.respond(|poems| poems.iter().take(count as usize).cloned().collect())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_search_filters_library() {
        let source = MockPoetrySource::with_poems(fixtures::library());

        let results = source
            .search(&SearchCriteria::new(Some("  robert  FROST "), None, false))
            .await
            .unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.author == "Robert Frost"));

        let exact = source
            .search(&SearchCriteria::new(None, Some("fire and ice"), true))
            .await
            .unwrap();
        assert!(exact.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_lists_authors() {
        let source = MockPoetrySource::with_poems(fixtures::library());
        let results = source.search(&SearchCriteria::default()).await.unwrap();
        assert!(results.iter().all(|p| p.lines.is_empty()));
        assert_eq!(
            source.recorded_calls().await[0],
            RecordedCall::Search {
                criteria: SearchCriteria::default(),
                url: "https://poetrydb.org/author".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_error_injection_is_consumed() {
        let source = MockPoetrySource::with_poems(fixtures::library());
        source.set_next_error(fixtures::server_error("/random/1")).await;

        tokio_test::assert_err!(source.random(1).await);
        let poems = tokio_test::assert_ok!(source.random(1).await);
        assert_eq!(poems.len(), 1);
        assert_eq!(source.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let source = MockPoetrySource::with_poems(fixtures::library());
        source.push_response(Ok(vec![]), Duration::ZERO).await;
        source
            .push_response(Err(fixtures::network_error("/random/2")), Duration::ZERO)
            .await;

        assert!(source.random(2).await.unwrap().is_empty());
        assert_eq!(source.random(2).await.unwrap_err().status, 0);
        assert_eq!(source.random(2).await.unwrap().len(), 2);
    }
}
