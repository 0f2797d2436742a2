//! Environment-based configuration.

use std::collections::HashMap;

use super::AllowsConfig;
use crate::error::{AllowsError, Result};

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "ALLOWS";

/// Recognized variable names, without the prefix.
pub mod vars {
    /// Method path separator (a single character).
    pub const PATH_SEPARATOR: &str = "PATH_SEPARATOR";
    /// Whether mocks record calls.
    pub const RECORD_CALLS: &str = "RECORD_CALLS";
    /// Whether every invocation is traced.
    pub const TRACE_CALLS: &str = "TRACE_CALLS";
    /// Whether installs are logged.
    pub const LOG_INSTALLS: &str = "LOG_INSTALLS";
}

/// Environment variable reader.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    /// Fixed variables used instead of the process environment.
    vars: Option<HashMap<String, String>>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a reader over the process environment.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Create a reader over a fixed set of variables.
    #[must_use]
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let var_name = self.var_name(name);
        match &self.vars {
            Some(vars) => vars.get(&var_name).cloned(),
            None => std::env::var(&var_name).ok(),
        }
    }

    /// Get a boolean value.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(|v| {
            matches!(
                v.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on" | "enabled"
            )
        })
    }

    /// Get a single-character value.
    pub fn char(&self, name: &str) -> Result<Option<char>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Some(c)),
            _ => Err(AllowsError::config(format!(
                "{} must be a single character, got '{value}'",
                self.var_name(name)
            ))),
        }
    }

    /// Overlay the variables that are set onto `config`.
    pub fn apply(&self, mut config: AllowsConfig) -> Result<AllowsConfig> {
        if let Some(separator) = self.char(vars::PATH_SEPARATOR)? {
            config.path_separator = separator;
        }
        if let Some(record) = self.bool(vars::RECORD_CALLS) {
            config.record_calls = record;
        }
        if let Some(trace) = self.bool(vars::TRACE_CALLS) {
            config.logging.trace_calls = trace;
        }
        if let Some(log) = self.bool(vars::LOG_INSTALLS) {
            config.logging.log_installs = log;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_config_prefix() {
        let config = EnvConfig::new("TEST");
        assert_eq!(config.var_name("foo"), "TEST_FOO");
        assert_eq!(config.var_name("bar_baz"), "TEST_BAR_BAZ");
    }

    #[test]
    fn env_config_no_prefix() {
        let config = EnvConfig::new("");
        assert_eq!(config.var_name("foo"), "FOO");
    }

    #[test]
    fn env_bool_parsing() {
        let config = EnvConfig::from_vars(
            "TEST",
            [("TEST_ENABLED", "true"), ("TEST_DISABLED", "off")],
        );

        assert_eq!(config.bool("ENABLED"), Some(true));
        assert_eq!(config.bool("DISABLED"), Some(false));
        assert_eq!(config.bool("MISSING"), None);
    }

    #[test]
    fn apply_overrides_set_values_only() {
        let env = EnvConfig::from_vars(
            DEFAULT_PREFIX,
            [("ALLOWS_PATH_SEPARATOR", "/"), ("ALLOWS_TRACE_CALLS", "1")],
        );
        let config = env.apply(AllowsConfig::default()).unwrap();

        assert_eq!(config.path_separator, '/');
        assert!(config.record_calls);
        assert!(config.logging.trace_calls);
    }

    #[test]
    fn multi_character_separator_is_rejected() {
        let env = EnvConfig::from_vars(DEFAULT_PREFIX, [("ALLOWS_PATH_SEPARATOR", "::")]);
        let err = env.apply(AllowsConfig::default()).unwrap_err();
        assert!(err.to_string().contains("ALLOWS_PATH_SEPARATOR"));
    }
}
