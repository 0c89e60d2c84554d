pub mod config;
pub mod metrics;
pub mod poetry;
pub mod scorer;
pub mod session;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, ServerConfig,
};
pub use poetry::{
    Poem, PoetryDbClient, PoetryDbConfig, PoetryDbError, PoetrySource, QueryBuilder,
    SearchCriteria,
};
pub use scorer::{best_match, count_word, rank, ScoreEntry, WordMatcher};
pub use session::{
    CriteriaDebouncer, PoemView, SearchOrchestrator, SessionConfig, SessionError,
    SessionSnapshot,
};
