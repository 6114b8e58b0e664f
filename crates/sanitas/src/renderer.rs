//! HTML serialization of a filtered event stream.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! The renderer trusts the sanitizer for structure but not for content: every
//! name is checked again, attribute values are always quoted and escaped, and
//! text is escaped unless it sits inside a raw text element. Raw text is
//! written literally, so it is scanned for anything that would end the
//! element early, and such input is refused rather than repaired.

use std::io::{self, Write};

use sanitas_common::names::{is_valid_attribute_name, is_valid_element_name};
use sanitas_html::elements::{is_raw_text_element, is_void_element};
use sanitas_html::{Attribute, Event, LexicalError};

use crate::error::TranslateError;
use crate::sanitizer::EventReceiver;

/// Sequences that must not appear inside raw text. `</` plus the element
/// name is checked separately.
const RAW_TEXT_HAZARDS: &[&str] = &["<!--"];

/// The raw text element currently open, and the end of its text seen so far.
#[derive(Debug)]
struct RawText {
    element: String,
    /// Lowercased trailing bytes of the previous text, so a hazard split
    /// across two text events is still found.
    tail: String,
}

/// Writes events as HTML to a byte sink.
#[derive(Debug)]
pub struct HtmlRenderer<'w, W: Write + ?Sized> {
    sink: &'w mut W,
    raw_text: Option<RawText>,
}

impl<'w, W: Write + ?Sized> HtmlRenderer<'w, W> {
    /// A renderer writing to `sink`.
    #[must_use]
    pub const fn new(sink: &'w mut W) -> Self {
        Self {
            sink,
            raw_text: None,
        }
    }

    /// Serialize one event.
    ///
    /// # Errors
    ///
    /// [`TranslateError::Lexical`] for names that cannot be written
    /// unambiguously and for raw text that would close its element early.
    /// [`TranslateError::SinkWrite`] if the sink fails.
    pub fn render(&mut self, event: &Event) -> Result<(), TranslateError> {
        match event {
            Event::OpenTag {
                name, attributes, ..
            } => {
                if let Some(raw) = &self.raw_text {
                    return Err(unsafe_raw_text(&raw.element));
                }
                self.write_start_tag(name, attributes)?;
                if is_raw_text_element(name) {
                    self.raw_text = Some(RawText {
                        element: name.clone(),
                        tail: String::new(),
                    });
                }
            }
            Event::Text(text) => self.write_text(text)?,
            Event::CloseTag { name } => {
                if let Some(raw) = &self.raw_text {
                    if raw.element != *name {
                        return Err(unsafe_raw_text(&raw.element));
                    }
                    self.raw_text = None;
                }
                check_element_name(name)?;
                if !is_void_element(name) {
                    write!(self.sink, "</{name}>")?;
                }
            }
            Event::Comment(_) => {}
            Event::EndOfInput => self.sink.flush()?,
        }
        Ok(())
    }

    fn write_start_tag(
        &mut self,
        name: &str,
        attributes: &[Attribute],
    ) -> Result<(), TranslateError> {
        check_element_name(name)?;
        write!(self.sink, "<{name}")?;
        for attribute in attributes {
            if !is_valid_attribute_name(&attribute.name) {
                return Err(LexicalError::InvalidName {
                    name: attribute.name.clone(),
                }
                .into());
            }
            write!(self.sink, " {}=\"", attribute.name)?;
            write_escaped_attribute_value(self.sink, &attribute.value)?;
            self.sink.write_all(b"\"")?;
        }
        if is_void_element(name) {
            self.sink.write_all(b" />")?;
        } else {
            self.sink.write_all(b">")?;
        }
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), TranslateError> {
        let Some(raw) = &mut self.raw_text else {
            write_escaped_text(self.sink, text)?;
            return Ok(());
        };

        let mut window = std::mem::take(&mut raw.tail);
        window.push_str(&text.to_ascii_lowercase());
        let end_tag = format!("</{}", raw.element);
        if window.contains(&end_tag) || RAW_TEXT_HAZARDS.iter().any(|h| window.contains(h)) {
            return Err(unsafe_raw_text(&raw.element));
        }

        let keep = RAW_TEXT_HAZARDS
            .iter()
            .map(|h| h.len())
            .chain([end_tag.len()])
            .max()
            .unwrap_or(0)
            .saturating_sub(1);
        let mut start = window.len().saturating_sub(keep);
        while !window.is_char_boundary(start) {
            start -= 1;
        }
        raw.tail = window.split_off(start);

        self.sink.write_all(text.as_bytes())?;
        Ok(())
    }
}

impl<W: Write + ?Sized> EventReceiver for HtmlRenderer<'_, W> {
    fn receive(&mut self, event: Event) -> Result<(), TranslateError> {
        self.render(&event)
    }
}

fn check_element_name(name: &str) -> Result<(), TranslateError> {
    if is_valid_element_name(name) {
        Ok(())
    } else {
        Err(LexicalError::InvalidName {
            name: name.to_string(),
        }
        .into())
    }
}

fn unsafe_raw_text(element: &str) -> TranslateError {
    LexicalError::UnsafeRawText {
        element: element.to_string(),
    }
    .into()
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
/// in text mode: `&`, `<` and `>`.
///
/// # Errors
///
/// Any error from `sink`.
pub fn write_escaped_text<W: Write + ?Sized>(sink: &mut W, text: &str) -> io::Result<()> {
    write_escaped(sink, text, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape a double-quoted attribute value: `&`, `<`, `>`, both quote
/// characters and the backtick.
///
/// # Errors
///
/// Any error from `sink`.
pub fn write_escaped_attribute_value<W: Write + ?Sized>(
    sink: &mut W,
    value: &str,
) -> io::Result<()> {
    write_escaped(sink, value, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        '`' => Some("&#96;"),
        _ => None,
    })
}

/// Write `text` with every character `replacement` maps replaced, copying the
/// runs in between straight from `text`.
fn write_escaped<W: Write + ?Sized>(
    sink: &mut W,
    text: &str,
    replacement: impl Fn(char) -> Option<&'static str>,
) -> io::Result<()> {
    let mut run_start = 0;
    for (i, c) in text.char_indices() {
        if let Some(entity) = replacement(c) {
            sink.write_all(&text.as_bytes()[run_start..i])?;
            sink.write_all(entity.as_bytes())?;
            run_start = i + c.len_utf8();
        }
    }
    sink.write_all(&text.as_bytes()[run_start..])
}
