//! Configuration management for the docsearch MCP server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is read through `dotenvy`, which does not print to stdout (the MCP
//! channel).

use crate::error::{ConfigError, ConfigResult};
use crate::search::snippet::DEFAULT_CONTEXT_CHARS;
use crate::search::{LoadOptions, SearchOptions, DEFAULT_HEADING_WEIGHT, DEFAULT_TEXT_WEIGHT};
use std::env;
use std::path::PathBuf;

/// Upper bound for `DOCSEARCH_HEADING_WEIGHT` and `DOCSEARCH_TEXT_WEIGHT`
pub const MAX_WEIGHT: u32 = 1000;

/// Configuration for the docsearch MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the generator's search index (`search_index.js` or JSON)
    pub index_path: PathBuf,

    /// Skip malformed records instead of failing the load (default: true)
    pub skip_malformed: bool,

    /// Reject queries with no searchable terms (default: false)
    pub reject_empty_query: bool,

    /// Let query tokens match as prefixes (default: true)
    pub prefix_match: bool,

    /// Weight of a match in a title or page name (default: 3)
    pub heading_weight: u32,

    /// Weight of a match only in body text (default: 1)
    pub text_weight: u32,

    /// Maximum number of results when the caller gives no limit (default: 10)
    pub max_search_results: usize,

    /// Snippet context on each side of the match, in characters (default: 60)
    pub snippet_context_chars: usize,

    /// Query result cache TTL in seconds, 0 disables (default: 60)
    pub query_cache_ttl_secs: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DOCSEARCH_INDEX_PATH`: Path to the search index file
    ///
    /// Optional environment variables:
    /// - `DOCSEARCH_SKIP_MALFORMED`: Skip malformed records (default: true)
    /// - `DOCSEARCH_REJECT_EMPTY_QUERY`: Reject empty queries (default: false)
    /// - `DOCSEARCH_PREFIX_MATCH`: Prefix-match query tokens (default: true)
    /// - `DOCSEARCH_HEADING_WEIGHT`: Title/page match weight (default: 3)
    /// - `DOCSEARCH_TEXT_WEIGHT`: Body text match weight (default: 1)
    /// - `MAX_SEARCH_RESULTS`: Default result limit (default: 10)
    /// - `SNIPPET_CONTEXT_CHARS`: Snippet context (default: 60)
    /// - `QUERY_CACHE_TTL_SECS`: Result cache TTL (default: 60)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let index_path = env::var("DOCSEARCH_INDEX_PATH")
            .map_err(|_| ConfigError::MissingVar("DOCSEARCH_INDEX_PATH".to_string()))?;

        if index_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DOCSEARCH_INDEX_PATH".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let defaults = Config::default();

        let heading_weight =
            Self::parse_env_u32("DOCSEARCH_HEADING_WEIGHT", defaults.heading_weight)?;
        let text_weight = Self::parse_env_u32("DOCSEARCH_TEXT_WEIGHT", defaults.text_weight)?;

        if text_weight == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DOCSEARCH_TEXT_WEIGHT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        if heading_weight > MAX_WEIGHT {
            return Err(ConfigError::InvalidValue {
                var: "DOCSEARCH_HEADING_WEIGHT".to_string(),
                reason: format!("Must be at most {}, got: {}", MAX_WEIGHT, heading_weight),
            });
        }
        if heading_weight < text_weight {
            return Err(ConfigError::InvalidValue {
                var: "DOCSEARCH_HEADING_WEIGHT".to_string(),
                reason: format!(
                    "Must be at least DOCSEARCH_TEXT_WEIGHT ({}), got: {}",
                    text_weight, heading_weight
                ),
            });
        }

        Ok(Config {
            index_path: PathBuf::from(index_path),
            skip_malformed: Self::parse_env_bool(
                "DOCSEARCH_SKIP_MALFORMED",
                defaults.skip_malformed,
            )?,
            reject_empty_query: Self::parse_env_bool(
                "DOCSEARCH_REJECT_EMPTY_QUERY",
                defaults.reject_empty_query,
            )?,
            prefix_match: Self::parse_env_bool("DOCSEARCH_PREFIX_MATCH", defaults.prefix_match)?,
            heading_weight,
            text_weight,
            max_search_results: Self::parse_env_usize(
                "MAX_SEARCH_RESULTS",
                defaults.max_search_results,
            )?,
            snippet_context_chars: Self::parse_env_usize(
                "SNIPPET_CONTEXT_CHARS",
                defaults.snippet_context_chars,
            )?,
            query_cache_ttl_secs: Self::parse_env_u64(
                "QUERY_CACHE_TTL_SECS",
                defaults.query_cache_ttl_secs,
            )?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Loader policy derived from this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_malformed: self.skip_malformed,
        }
    }

    /// Query options derived from this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.max_search_results,
            heading_weight: self.heading_weight,
            text_weight: self.text_weight,
            prefix_match: self.prefix_match,
            reject_empty_query: self.reject_empty_query,
            snippet_context_chars: self.snippet_context_chars,
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_path: PathBuf::new(),
            skip_malformed: true,
            reject_empty_query: false,
            prefix_match: true,
            heading_weight: DEFAULT_HEADING_WEIGHT,
            text_weight: DEFAULT_TEXT_WEIGHT,
            max_search_results: 10,
            snippet_context_chars: DEFAULT_CONTEXT_CHARS,
            query_cache_ttl_secs: 60,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const OPTIONAL_VARS: &[&str] = &[
        "DOCSEARCH_SKIP_MALFORMED",
        "DOCSEARCH_REJECT_EMPTY_QUERY",
        "DOCSEARCH_PREFIX_MATCH",
        "DOCSEARCH_HEADING_WEIGHT",
        "DOCSEARCH_TEXT_WEIGHT",
        "MAX_SEARCH_RESULTS",
        "SNIPPET_CONTEXT_CHARS",
        "QUERY_CACHE_TTL_SECS",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            for var in OPTIONAL_VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.skip_malformed);
        assert!(!config.reject_empty_query);
        assert_eq!(config.heading_weight, 3);
        assert_eq!(config.text_weight, 1);
        assert_eq!(config.max_search_results, 10);
        assert_eq!(config.query_cache_ttl_secs, 60);
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("DOCSEARCH_INDEX_PATH", "docs/build/search_index.js");
        guard.set("DOCSEARCH_HEADING_WEIGHT", "5");
        guard.set("DOCSEARCH_SKIP_MALFORMED", "false");
        guard.set("MAX_SEARCH_RESULTS", "25");

        let config = Config::from_env().unwrap();
        assert_eq!(config.index_path, PathBuf::from("docs/build/search_index.js"));
        assert_eq!(config.heading_weight, 5);
        assert_eq!(config.text_weight, 1);
        assert!(!config.skip_malformed);
        assert_eq!(config.max_search_results, 25);
        assert!(config.prefix_match);
    }

    #[test]
    #[serial]
    fn test_config_empty_index_path() {
        let mut guard = EnvGuard::new();
        guard.set("DOCSEARCH_INDEX_PATH", "   ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "DOCSEARCH_INDEX_PATH")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_heading_weight_below_text_weight() {
        let mut guard = EnvGuard::new();
        guard.set("DOCSEARCH_INDEX_PATH", "search_index.js");
        guard.set("DOCSEARCH_HEADING_WEIGHT", "1");
        guard.set("DOCSEARCH_TEXT_WEIGHT", "2");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "DOCSEARCH_HEADING_WEIGHT")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_weight_above_maximum() {
        let mut guard = EnvGuard::new();
        guard.set("DOCSEARCH_INDEX_PATH", "search_index.js");
        guard.set("DOCSEARCH_HEADING_WEIGHT", &u32::MAX.to_string());

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, reason }) => {
                assert_eq!(var, "DOCSEARCH_HEADING_WEIGHT");
                assert!(reason.contains("at most 1000"));
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }

        guard.set("DOCSEARCH_HEADING_WEIGHT", "1000");
        guard.set("DOCSEARCH_TEXT_WEIGHT", "1000");
        let config = Config::from_env().unwrap();
        assert_eq!(config.heading_weight, MAX_WEIGHT);
    }

    #[test]
    #[serial]
    fn test_config_zero_text_weight() {
        let mut guard = EnvGuard::new();
        guard.set("DOCSEARCH_INDEX_PATH", "search_index.js");
        guard.set("DOCSEARCH_TEXT_WEIGHT", "0");

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_bool() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_BOOL_YES", "Yes");
        guard.set("TEST_BOOL_OFF", "off");
        guard.set("TEST_BOOL_BAD", "maybe");

        assert!(Config::parse_env_bool("TEST_BOOL_YES", false).unwrap());
        assert!(!Config::parse_env_bool("TEST_BOOL_OFF", true).unwrap());
        assert!(Config::parse_env_bool("TEST_BOOL_BAD", true).is_err());
        assert!(Config::parse_env_bool("NONEXISTENT_BOOL", true).unwrap());
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        assert!(Config::parse_env_u64("TEST_U64_INVALID", 10).is_err());
        assert_eq!(Config::parse_env_u64("NONEXISTENT", 10).unwrap(), 10);
    }

    #[test]
    fn test_search_options_from_config() {
        let config = Config {
            heading_weight: 4,
            prefix_match: false,
            max_search_results: 7,
            ..Config::default()
        };

        let options = config.search_options();
        assert_eq!(options.heading_weight, 4);
        assert_eq!(options.limit, 7);
        assert!(!options.prefix_match);
        assert!(config.load_options().skip_malformed);
    }
}
