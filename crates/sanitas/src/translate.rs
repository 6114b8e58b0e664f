//! The pipeline: tokenize, sanitize, render.

use std::io::Write;

use sanitas_html::{LexicalError, tokenize};
use sanitas_policy::Policy;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::renderer::HtmlRenderer;
use crate::sanitizer::Sanitizer;

/// Resource limits for one translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Inputs longer than this many bytes are refused. `None` means no limit.
    pub max_input_bytes: Option<usize>,
    /// Allowed elements nested deeper than this are dropped, keeping their text.
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: None,
            max_nesting_depth: Sanitizer::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Sanitize `markup` under `policy`, streaming HTML into `sink`.
///
/// Nothing is buffered beyond the current run of text, so on error the sink
/// holds a partial document that must be discarded.
///
/// # Errors
///
/// See [`TranslateError`].
pub fn translate<W>(markup: &str, sink: &mut W, policy: &Policy) -> Result<(), TranslateError>
where
    W: Write + ?Sized,
{
    translate_with_limits(markup, sink, policy, Limits::default())
}

/// [`translate`] with explicit [`Limits`].
///
/// # Errors
///
/// [`LexicalError::InputTooLarge`] before anything is written if the input
/// exceeds `limits.max_input_bytes`, otherwise as [`translate`].
pub fn translate_with_limits<W>(
    markup: &str,
    sink: &mut W,
    policy: &Policy,
    limits: Limits,
) -> Result<(), TranslateError>
where
    W: Write + ?Sized,
{
    if let Some(limit) = limits.max_input_bytes
        && markup.len() > limit
    {
        return Err(LexicalError::InputTooLarge {
            len: markup.len(),
            limit,
        }
        .into());
    }

    let mut renderer = HtmlRenderer::new(sink);
    Sanitizer::new(policy)
        .with_max_depth(limits.max_nesting_depth)
        .run(tokenize(markup), &mut renderer)
}

/// Sanitize into a `String`.
///
/// # Errors
///
/// Only lexical errors; writing to memory cannot fail.
pub fn sanitize(markup: &str, policy: &Policy) -> Result<String, TranslateError> {
    let mut out = Vec::with_capacity(markup.len());
    translate(markup, &mut out, policy)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
