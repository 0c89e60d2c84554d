use std::sync::Arc;
use stanza_core::{Config, CriteriaDebouncer, PoetrySource, SearchOrchestrator};

/// Shared application state
pub struct AppState {
    config: Config,
    session: SearchOrchestrator,
    debouncer: CriteriaDebouncer,
}

impl AppState {
    /// Build the session around `source` and start its criteria debouncer.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(config: Config, source: Arc<dyn PoetrySource>) -> Self {
        let session = SearchOrchestrator::new(source, config.session.clone());
        let debouncer = CriteriaDebouncer::spawn(session.clone(), config.session.debounce());
        Self {
            config,
            session,
            debouncer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SearchOrchestrator {
        &self.session
    }

    pub fn debouncer(&self) -> &CriteriaDebouncer {
        &self.debouncer
    }
}
