//! Timer-based coalescing of criteria changes.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::poetry::SearchCriteria;

use super::orchestrator::SearchOrchestrator;

/// Turns a stream of criteria edits into at most one search per settled
/// burst.
///
/// Every new input restarts the quiet period. When it elapses the settled
/// criteria are compared with the last dispatched ones; a change is
/// recorded and, if author or title is filled in, dispatched as a silent
/// filtered search. The background task ends when the debouncer is dropped.
pub struct CriteriaDebouncer {
    tx: mpsc::UnboundedSender<SearchCriteria>,
}

impl CriteriaDebouncer {
    /// Spawn the debounce task. Must be called within a tokio runtime.
    pub fn spawn(orchestrator: SearchOrchestrator, window: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(rx, orchestrator, window));
        Self { tx }
    }

    /// Feed a new criteria value. Returns false if the task has stopped.
    pub fn push(&self, criteria: SearchCriteria) -> bool {
        self.tx.send(criteria).is_ok()
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<SearchCriteria>,
    orchestrator: SearchOrchestrator,
    window: Duration,
) {
    let mut last_dispatched: Option<SearchCriteria> = None;

    while let Some(mut pending) = rx.recv().await {
        let deadline = sleep(window);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(criteria) => {
                        pending = criteria;
                        deadline.as_mut().reset(Instant::now() + window);
                    }
                    None => return,
                },
                _ = &mut deadline => break,
            }
        }

        if last_dispatched.as_ref() == Some(&pending) {
            debug!("Criteria unchanged after debounce, skipping search");
            continue;
        }
        last_dispatched = Some(pending.clone());

        if !pending.can_search() {
            debug!("Criteria empty after debounce, skipping search");
            continue;
        }

        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            orchestrator.search_with(pending, false).await;
        });
    }

    debug!("Criteria debouncer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::session::SessionConfig;
    use crate::testing::{fixtures, MockPoetrySource, RecordedCall};

    const WINDOW: Duration = Duration::from_millis(250);

    fn setup() -> (Arc<MockPoetrySource>, SearchOrchestrator, CriteriaDebouncer) {
        let source = Arc::new(MockPoetrySource::with_poems(fixtures::library()));
        let orch = SearchOrchestrator::new(Arc::clone(&source) as _, SessionConfig::default());
        let debouncer = CriteriaDebouncer::spawn(orch.clone(), WINDOW);
        (source, orch, debouncer)
    }

    fn author(name: &str) -> SearchCriteria {
        SearchCriteria::new(Some(name), None, false)
    }

    async fn searched_authors(source: &MockPoetrySource) -> Vec<Option<String>> {
        source
            .recorded_calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Search { criteria, .. } => Some(criteria.author),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_search() {
        let (source, orch, debouncer) = setup();

        for prefix in ["F", "Fr", "Fro", "Fros", "Frost"] {
            debouncer.push(author(prefix));
            sleep(Duration::from_millis(50)).await;
        }
        sleep(WINDOW * 2).await;

        assert_eq!(searched_authors(&source).await, vec![Some("Frost".to_string())]);
        let snapshot = orch.snapshot().await;
        assert!(!snapshot.poems.is_empty());
        assert!(!snapshot.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_search_separately() {
        let (source, _orch, debouncer) = setup();

        debouncer.push(author("Frost"));
        sleep(WINDOW * 2).await;
        debouncer.push(author("Dickinson"));
        sleep(WINDOW * 2).await;

        assert_eq!(
            searched_authors(&source).await,
            vec![Some("Frost".to_string()), Some("Dickinson".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_criteria_is_not_searched_again() {
        let (source, _orch, debouncer) = setup();

        debouncer.push(author("Frost"));
        sleep(WINDOW * 2).await;
        debouncer.push(author("Fros"));
        debouncer.push(author("Frost"));
        sleep(WINDOW * 2).await;

        assert_eq!(source.call_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_criteria_never_searches() {
        let (source, _orch, debouncer) = setup();

        debouncer.push(SearchCriteria::new(Some("   "), Some(""), true));
        sleep(WINDOW * 2).await;

        assert_eq!(source.call_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_search_is_silent() {
        let (source, orch, debouncer) = setup();
        source.set_delay(Duration::from_secs(1)).await;

        debouncer.push(author("Frost"));
        sleep(WINDOW + Duration::from_millis(10)).await;

        assert_eq!(source.call_count().await, 1);
        assert!(!orch.snapshot().await.loading);
    }
}
