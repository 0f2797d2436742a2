//! File-based configuration loading.

use std::path::Path;

use super::AllowsConfig;
use crate::error::{AllowsError, Result};

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Reads an [`AllowsConfig`] from a file.
///
/// The format comes from the file extension; files without a recognized
/// extension use the fallback set with [`with_format`](Self::with_format).
#[derive(Debug, Default)]
pub struct ConfigLoader {
    fallback: Option<ConfigFormat>,
}

impl ConfigLoader {
    /// Loader that only accepts `.toml` and `.json` files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse files with an unrecognized extension as `format`.
    #[must_use]
    pub const fn with_format(mut self, format: ConfigFormat) -> Self {
        self.fallback = Some(format);
        self
    }

    /// Read and parse `path`.
    pub fn load(&self, path: &Path) -> Result<AllowsConfig> {
        let format = ConfigFormat::from_path(path)
            .or(self.fallback)
            .ok_or_else(|| {
                AllowsError::config(format!("unknown config format: {}", path.display()))
            })?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| AllowsError::io_context(format!("reading {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), ?format, "loading allows config");
        parse_config(&content, format)
    }
}

/// Parse config content.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<AllowsConfig> {
    match format {
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| AllowsError::config(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| AllowsError::config(e.to_string()))
        }
    }
}
