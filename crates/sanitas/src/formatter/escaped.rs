use std::io::{self, Write};

use super::MarkupFormatter;
use crate::error::TranslateError;

/// Treats markup as plain text: everything is escaped, line breaks become
/// `<br>` and runs of spaces survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapedFormatter;

impl EscapedFormatter {
    /// Registry name.
    pub const NAME: &'static str = "escaped";
}

impl MarkupFormatter for EscapedFormatter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Plain text"
    }

    fn translate(&self, markup: &str, sink: &mut dyn Write) -> Result<(), TranslateError> {
        write_plain_text(sink, markup)?;
        sink.flush()?;
        Ok(())
    }
}

/// Bytes collected before they are written out.
const BUFFER_SIZE: usize = 8 * 1024;

fn write_plain_text(sink: &mut dyn Write, text: &str) -> io::Result<()> {
    let mut out = String::with_capacity(BUFFER_SIZE.min(text.len()));
    let mut chars = text.chars().peekable();
    let mut previous_space = false;
    while let Some(c) = chars.next() {
        let space = c == ' ';
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\r' => {
                let _ = chars.next_if_eq(&'\n');
                out.push_str("<br>");
            }
            '\n' => out.push_str("<br>"),
            ' ' if previous_space => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
        previous_space = space;
        if out.len() >= BUFFER_SIZE {
            sink.write_all(out.as_bytes())?;
            out.clear();
        }
    }
    sink.write_all(out.as_bytes())
}
