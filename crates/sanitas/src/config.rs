//! Host configuration: which formatter to use and its options.
//!
//! ```json
//! {
//!   "formatter": "raw-html",
//!   "options": { "disable_syntax_highlighting": false }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::formatter::{FormatterRegistry, MarkupFormatter, RawHtmlFormatter};

/// A formatter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry name of the formatter.
    pub formatter: String,
    /// Options passed to the formatter's factory.
    pub options: Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formatter: RawHtmlFormatter::NAME.to_string(),
            options: Value::Null,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the text is not a configuration object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Build the configured formatter.
    ///
    /// # Errors
    ///
    /// See [`FormatterRegistry::create`].
    pub fn build_formatter(
        &self,
        registry: &FormatterRegistry,
    ) -> Result<Box<dyn MarkupFormatter>, ConfigError> {
        registry.create(&self.formatter, &self.options)
    }
}
