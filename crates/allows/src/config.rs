//! Configuration types for allows.
//!
//! This module defines the configuration carried by every [`Mock`]:
//! how dotted method paths are split, whether calls are recorded, and
//! which events are logged. Configuration can be built in code, read from
//! `ALLOWS_*` environment variables ([`env`]) or loaded from a TOML or JSON
//! file ([`file`]).
//!
//! [`Mock`]: crate::Mock

pub mod env;
pub mod file;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default separator for nested method paths (`"a.b"` → `a`, then `b`).
pub const DEFAULT_PATH_SEPARATOR: char = '.';

/// Configuration for mocks and their configured behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowsConfig {
    /// Separator used to split method paths into attribute lookups.
    pub path_separator: char,

    /// Whether mocks record the calls made to them.
    pub record_calls: bool,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Default for AllowsConfig {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR,
            record_calls: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl AllowsConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ALLOWS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        env::EnvConfig::default().apply(Self::default())
    }

    /// Load configuration from a TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        file::ConfigLoader::new().load(path.as_ref())
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        file::parse_config(content, file::ConfigFormat::Toml)
    }

    /// Set the method path separator.
    #[must_use]
    pub const fn path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }

    /// Set whether calls are recorded.
    #[must_use]
    pub const fn record_calls(mut self, enabled: bool) -> Self {
        self.record_calls = enabled;
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub const fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

/// Configuration for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit a `trace` event for every invocation of a mock.
    pub trace_calls: bool,

    /// Emit a `debug` event whenever a dispatch table is installed or extended.
    pub log_installs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            trace_calls: false,
            log_installs: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether invocations are traced.
    #[must_use]
    pub const fn trace_calls(mut self, enabled: bool) -> Self {
        self.trace_calls = enabled;
        self
    }

    /// Set whether installs are logged.
    #[must_use]
    pub const fn log_installs(mut self, enabled: bool) -> Self {
        self.log_installs = enabled;
        self
    }
}
