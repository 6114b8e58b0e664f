//! The sanitizer: a policy-driven filter over the event stream.
//!
//! The sanitizer keeps a stack of the allowed elements that are currently
//! open, and at most one suppressed element whose content is being dropped.
//! Every element it opens is closed again, either by a matching close tag or
//! by a synthesized one at end of input, so the filtered stream is always
//! well-formed no matter what the input looked like.

use sanitas_common::warning::warn_once;
use sanitas_html::elements::is_void_element;
use sanitas_html::{Attribute, Event, LexicalError};
use sanitas_policy::{Decision, Disposition, Policy};

use crate::error::TranslateError;

/// Consumer of a filtered event stream.
pub trait EventReceiver {
    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Any error aborts the run it occurs in.
    fn receive(&mut self, event: Event) -> Result<(), TranslateError>;
}

/// Collects events, mostly for tests and the CLI's event dump.
impl EventReceiver for Vec<Event> {
    fn receive(&mut self, event: Event) -> Result<(), TranslateError> {
        self.push(event);
        Ok(())
    }
}

/// An allowed element that has been opened and not yet closed.
#[derive(Debug, Clone)]
struct OpenElement {
    /// Name in the input, matched against close tags.
    input_name: String,
    /// Name in the output, after any rename.
    output_name: String,
}

/// An element being dropped together with its content.
#[derive(Debug, Clone)]
struct Suppression {
    name: String,
    /// Open same-name elements, the suppressed one included.
    depth: usize,
}

/// Filters events through a [`Policy`].
///
/// State is per run: create one sanitizer per document.
#[derive(Debug)]
pub struct Sanitizer<'p> {
    policy: &'p Policy,
    open_elements: Vec<OpenElement>,
    suppressed: Option<Suppression>,
    max_depth: usize,
}

impl<'p> Sanitizer<'p> {
    /// Nesting depth used unless [`Sanitizer::with_max_depth`] says otherwise.
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// A sanitizer for one document.
    #[must_use]
    pub const fn new(policy: &'p Policy) -> Self {
        Self {
            policy,
            open_elements: Vec::new(),
            suppressed: None,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how many allowed elements may be open at once. Start tags past
    /// the limit are dropped and their text kept.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of allowed elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    /// Returns true while the content of a rejected element is being dropped.
    #[must_use]
    pub const fn is_suppressing(&self) -> bool {
        self.suppressed.is_some()
    }

    /// Filter one event, forwarding whatever survives to `out`.
    ///
    /// # Errors
    ///
    /// Only errors returned by `out` are propagated; malformed structure is
    /// repaired, never reported.
    pub fn process<R>(&mut self, event: Event, out: &mut R) -> Result<(), TranslateError>
    where
        R: EventReceiver + ?Sized,
    {
        match event {
            Event::OpenTag {
                name, attributes, ..
            } => self.open_tag(name, &attributes, out),
            Event::Text(text) => {
                if self.suppressed.is_none() {
                    out.receive(Event::Text(text))?;
                }
                Ok(())
            }
            Event::CloseTag { name } => self.close_tag(&name, out),
            Event::Comment(_) => Ok(()),
            Event::EndOfInput => {
                while let Some(open) = self.open_elements.pop() {
                    out.receive(Event::CloseTag {
                        name: open.output_name,
                    })?;
                }
                self.suppressed = None;
                out.receive(Event::EndOfInput)
            }
        }
    }

    /// Filter a whole event stream.
    ///
    /// If the stream ends without [`Event::EndOfInput`] one is supplied, so
    /// open elements are always closed.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error from `events` or the first error from
    /// `out`. Nothing after it is processed.
    pub fn run<I, R>(mut self, events: I, out: &mut R) -> Result<(), TranslateError>
    where
        I: IntoIterator<Item = Result<Event, LexicalError>>,
        R: EventReceiver + ?Sized,
    {
        for event in events {
            let event = event?;
            let done = event.is_end_of_input();
            self.process(event, out)?;
            if done {
                return Ok(());
            }
        }
        self.process(Event::EndOfInput, out)
    }

    fn open_tag<R>(
        &mut self,
        name: String,
        attributes: &[Attribute],
        out: &mut R,
    ) -> Result<(), TranslateError>
    where
        R: EventReceiver + ?Sized,
    {
        if let Some(suppression) = &mut self.suppressed {
            if suppression.name == name && !is_void_element(&name) {
                suppression.depth += 1;
            }
            return Ok(());
        }

        match self.policy.evaluate(&name, attributes) {
            Decision::Allow {
                name: output_name,
                attributes,
            } => {
                // Elements that never get a close tag in the input are closed
                // right away instead of being pushed.
                if is_void_element(&name) || is_void_element(&output_name) {
                    let close = !is_void_element(&output_name);
                    out.receive(Event::OpenTag {
                        name: output_name.clone(),
                        attributes,
                        self_closing: false,
                    })?;
                    if close {
                        out.receive(Event::CloseTag { name: output_name })?;
                    }
                    return Ok(());
                }
                if self.open_elements.len() >= self.max_depth {
                    warn_once(
                        "Sanitizer",
                        &format!("nesting deeper than {} elements, dropping tags", self.max_depth),
                    );
                    return Ok(());
                }
                out.receive(Event::OpenTag {
                    name: output_name.clone(),
                    attributes,
                    self_closing: false,
                })?;
                self.open_elements.push(OpenElement {
                    input_name: name,
                    output_name,
                });
            }
            // The self-closing flag means nothing on non-void elements, so
            // `<script/>` still has content to drop.
            Decision::Reject(Disposition::DropElementAndContent) => {
                if !is_void_element(&name) {
                    self.suppressed = Some(Suppression { name, depth: 1 });
                }
            }
            Decision::Reject(Disposition::DropTagKeepText) => {}
        }
        Ok(())
    }

    fn close_tag<R>(&mut self, name: &str, out: &mut R) -> Result<(), TranslateError>
    where
        R: EventReceiver + ?Sized,
    {
        if let Some(suppression) = &mut self.suppressed {
            if suppression.name == name {
                suppression.depth -= 1;
                if suppression.depth == 0 {
                    self.suppressed = None;
                }
            }
            return Ok(());
        }

        let matches_top = self
            .open_elements
            .last()
            .is_some_and(|open| open.input_name == name);
        if matches_top && let Some(open) = self.open_elements.pop() {
            out.receive(Event::CloseTag {
                name: open.output_name,
            })?;
        }
        // Anything else is a stray close tag and is dropped.
        Ok(())
    }
}
