//! Markup formatters: the adapter between a host application and the
//! sanitizer.
//!
//! A host stores user-written descriptions along with the name of the
//! formatter that renders them, and asks the formatter for editor hints
//! (the `CodeMirror` mode) when showing an edit box. Formatters are looked up
//! by name in an explicit [`FormatterRegistry`] built at startup.

use std::fmt::Debug;
use std::io::Write;

use crate::error::TranslateError;

/// Plain text, escaped and line-broken.
pub mod escaped;
/// Policy-filtered HTML.
pub mod raw_html;
/// Name to constructor lookup.
pub mod registry;

pub use escaped::EscapedFormatter;
pub use raw_html::{RawHtmlConfig, RawHtmlFormatter, RawHtmlOptions};
pub use registry::{FormatterFactory, FormatterRegistry};

/// Turns stored markup into safe HTML.
pub trait MarkupFormatter: Send + Sync + Debug {
    /// Registry name, e.g. `raw-html`.
    fn name(&self) -> &'static str;

    /// Human readable name for configuration screens.
    fn display_name(&self) -> &'static str;

    /// Write the HTML rendering of `markup` to `sink`.
    ///
    /// # Errors
    ///
    /// See [`TranslateError`]. On error the sink holds partial output.
    fn translate(&self, markup: &str, sink: &mut dyn Write) -> Result<(), TranslateError>;

    /// [`MarkupFormatter::translate`] into a `String`.
    ///
    /// # Errors
    ///
    /// Lexical errors only.
    fn translate_to_string(&self, markup: &str) -> Result<String, TranslateError> {
        let mut out = Vec::with_capacity(markup.len());
        self.translate(markup, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// `CodeMirror` mode for the edit box, or `None` for a plain textarea.
    fn code_mirror_mode(&self) -> Option<&'static str> {
        None
    }

    /// Extra `CodeMirror` options as a JavaScript object body, if any.
    fn code_mirror_config(&self) -> Option<&'static str> {
        None
    }
}
