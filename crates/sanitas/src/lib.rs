//! Streaming HTML sanitizer.
//!
//! Untrusted markup goes through three stages:
//!
//! 1. **Tokenizer** ([`sanitas_html`]) turns text into a lazy stream of
//!    [`Event`]s.
//! 2. **Sanitizer** ([`Sanitizer`]) asks a [`Policy`] about every start tag,
//!    drops what is not allowed and repairs nesting so every element it lets
//!    through is closed.
//! 3. **Renderer** ([`HtmlRenderer`]) writes the surviving events as escaped
//!    HTML.
//!
//! The stages are connected as iterators and receivers. Text is handed on
//! in chunks of at most [`sanitas_html::Tokenizer::MAX_TEXT_CHUNK`] bytes and escaped
//! straight into the sink, so memory use is bounded by the longest single
//! tag or comment, not by the size of the input. [`translate`] runs the
//! whole pipeline; [`MarkupFormatter`] wraps it for host applications.
//!
//! ```
//! use sanitas::{rich_text, sanitize};
//!
//! let html = sanitize("<a href=\"javascript:alert(1)\">x</a>", &rich_text()).unwrap();
//! assert_eq!(html, "<a>x</a>");
//! ```

/// Formatter selection for host applications.
pub mod config;
/// Errors.
pub mod error;
/// The formatter adapter and registry.
pub mod formatter;
/// HTML serialization.
pub mod renderer;
/// Policy-driven event filtering.
pub mod sanitizer;
/// The full pipeline.
pub mod translate;

pub use config::Config;
pub use error::{ConfigError, SinkWriteError, TranslateError};
pub use formatter::{
    EscapedFormatter, FormatterRegistry, MarkupFormatter, RawHtmlConfig, RawHtmlFormatter,
};
pub use renderer::HtmlRenderer;
pub use sanitas_html::{Event, LexicalError};
pub use sanitas_policy::presets::{basic_formatting, rich_text};
pub use sanitas_policy::{Decision, Disposition, Policy};
pub use sanitizer::{EventReceiver, Sanitizer};
pub use translate::{Limits, sanitize, translate, translate_with_limits};
