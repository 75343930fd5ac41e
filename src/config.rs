//! Service configuration.
//!
//! Everything is read from environment variables at startup. A missing
//! API key does not prevent the server from starting; the processing
//! endpoint reports a configuration error instead.

use std::env;

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// API key for the language-model provider, if configured.
    pub api_key: Option<String>,
    /// Chat model used for task processing.
    pub model: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `TASKLENS_HOST` - bind address (default `127.0.0.1`)
    /// - `TASKLENS_PORT` - bind port (default `8080`)
    /// - `TASKLENS_MODEL` - chat model (default `gpt-4o-mini`)
    /// - `OPENAI_API_KEY` - provider credential
    pub fn from_env() -> Self {
        Self {
            host: env::var("TASKLENS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("TASKLENS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: env::var("TASKLENS_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }

    /// Whether a provider credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_key: key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn test_has_api_key() {
        assert!(config_with_key(Some("sk-test")).has_api_key());
        assert!(!config_with_key(None).has_api_key());
    }
}
