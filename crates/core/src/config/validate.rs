use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - PoetryDB base URL is http(s) and the timeout is positive
/// - Session sizes are positive and top_k fits in the pool
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let base_url = &config.poetrydb.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "poetrydb.base_url must be an http(s) URL, got '{}'",
            base_url
        )));
    }
    if config.poetrydb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "poetrydb.timeout_secs cannot be 0".to_string(),
        ));
    }

    let session = &config.session;
    if session.random_count == 0 || session.pool_size == 0 || session.top_k == 0 {
        return Err(ConfigError::ValidationError(
            "session.random_count, session.pool_size and session.top_k must be positive"
                .to_string(),
        ));
    }
    if session.top_k > session.pool_size as usize {
        return Err(ConfigError::ValidationError(format!(
            "session.top_k ({}) cannot exceed session.pool_size ({})",
            session.top_k, session.pool_size
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default();
        config.poetrydb.base_url = "ftp://poetrydb.org".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.poetrydb.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_top_k_exceeding_pool_fails() {
        let mut config = Config::default();
        config.session.pool_size = 5;
        config.session.top_k = 10;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_pool_fails() {
        let mut config = Config::default();
        config.session.pool_size = 0;
        assert!(validate_config(&config).is_err());
    }
}
