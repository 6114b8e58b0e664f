//! Errors surfaced by `translate` and the formatter adapter.
//!
//! Two conditions abort a translation: input the tokenizer or renderer
//! refuses ([`LexicalError`]), and a sink that rejects a write
//! ([`SinkWriteError`]). In both cases whatever reached the sink is partial
//! and must not be used as sanitized HTML.

use std::io;
use std::path::PathBuf;

use sanitas_html::LexicalError;
use sanitas_policy::PolicyError;
use thiserror::Error;

/// The output sink rejected a write or flush.
#[derive(Debug, Error)]
#[error("failed to write sanitized output: {0}")]
pub struct SinkWriteError(#[from] io::Error);

impl SinkWriteError {
    /// The underlying I/O error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.0
    }
}

/// Why a translation was aborted.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The input cannot be tokenized or serialized safely.
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    /// The sink failed.
    #[error(transparent)]
    SinkWrite(#[from] SinkWriteError),
}

impl From<io::Error> for TranslateError {
    fn from(error: io::Error) -> Self {
        Self::SinkWrite(SinkWriteError::from(error))
    }
}

/// A configuration that cannot be loaded or turned into a formatter.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration or formatter options are not valid JSON for their type.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// No formatter is registered under this name.
    #[error("unknown formatter {name:?}; registered: {registered}")]
    UnknownFormatter {
        /// The requested name.
        name: String,
        /// Comma-separated registered names.
        registered: String,
    },
    /// The embedded policy is invalid.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
