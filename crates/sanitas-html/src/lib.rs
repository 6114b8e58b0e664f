//! HTML tokenizer for the sanitas sanitizer.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data and PLAINTEXT states
//!   - Tag, attribute, comment and bogus comment states
//!   - Named and numeric character references
//! - **Events**: the tokenizer is an iterator of [`Event`]s, produced lazily in
//!   document order and never buffered beyond the current run of text.
//!
//! # Not Implemented
//!
//! - Tree construction. Structure is repaired downstream by the sanitizer's
//!   stack discipline, not by insertion modes.
//! - DOCTYPE tokens. A DOCTYPE is read as a bogus comment.
//! - Script data escape states. Script content ends at the first `</script`.

/// Element categories that change how content is tokenized or serialized.
pub mod elements;
/// Fatal lexical errors and recoverable parse issues.
pub mod error;
/// HTML tokenizer for converting input into events.
pub mod tokenizer;

pub use error::{LexicalError, ParseErrorKind, ParseIssue};
pub use tokenizer::{Attribute, Event, Tokenizer, tokenize, tokenize_bytes};
