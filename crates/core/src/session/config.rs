//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the browsing session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Quiet period before criteria changes trigger a search (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Poems fetched by a random fetch when no count is given.
    #[serde(default = "default_random_count")]
    pub random_count: u32,

    /// Random poems fetched for top-by-word ranking.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Poems kept after top-by-word ranking.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_random_count() -> u32 {
    1
}

fn default_pool_size() -> u32 {
    150
}

fn default_top_k() -> usize {
    10
}

impl SessionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            random_count: default_random_count(),
            pool_size: default_pool_size(),
            top_k: default_top_k(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.random_count, 1);
        assert_eq!(config.pool_size, 150);
        assert_eq!(config.top_k, 10);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SessionConfig = toml::from_str("top_k = 3").unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.pool_size, 150);
    }
}
