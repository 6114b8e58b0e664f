//! Error reporting for the tokenizer.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Parse errors in HTML are recoverable and are only recorded. A
//! [`LexicalError`] is the other kind: input the pipeline refuses to handle
//! at all.

use strum_macros::Display;
use thiserror::Error;

/// A fatal condition: the input cannot be tokenized or serialized safely.
///
/// No output produced before this error may be used as sanitized HTML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    /// The input bytes are not UTF-8.
    #[error("input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidEncoding {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
    },
    /// The input exceeds the configured size limit.
    #[error("input of {len} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge {
        /// Input length in bytes.
        len: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// The state machine stopped consuming input.
    #[error("tokenizer made no progress at byte {position}")]
    Stalled {
        /// Byte offset where progress stopped.
        position: usize,
    },
    /// Text inside a raw text element would close the element early.
    #[error("text inside <{element}> would terminate the element early")]
    UnsafeRawText {
        /// The enclosing raw text element.
        element: String,
    },
    /// A name that cannot be serialized unambiguously.
    #[error("refusing to serialize invalid name {name:?}")]
    InvalidName {
        /// The offending element or attribute name.
        name: String,
    },
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// The subset of the standard's error codes this tokenizer can report.
/// Displayed with the standard's names, e.g. `unexpected-null-character`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ParseErrorKind {
    AbruptClosingOfEmptyComment,
    AbsenceOfDigitsInNumericCharacterReference,
    CdataInHtmlContent,
    CharacterReferenceOutsideUnicodeRange,
    ControlCharacterReference,
    DuplicateAttribute,
    EndTagWithAttributes,
    EndTagWithTrailingSolidus,
    EofBeforeTagName,
    EofInComment,
    EofInTag,
    IncorrectlyClosedComment,
    IncorrectlyOpenedComment,
    InvalidFirstCharacterOfTagName,
    MissingAttributeValue,
    MissingEndTagName,
    MissingSemicolonAfterCharacterReference,
    MissingWhitespaceBetweenAttributes,
    NestedComment,
    NoncharacterCharacterReference,
    NullCharacterReference,
    SurrogateCharacterReference,
    UnexpectedCharacterInAttributeName,
    UnexpectedCharacterInUnquotedAttributeValue,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedNullCharacter,
    UnexpectedQuestionMarkInsteadOfTagName,
    UnexpectedSolidusInTag,
    UnknownNamedCharacterReference,
}

/// A recoverable parse error and where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Which parse error this is.
    pub kind: ParseErrorKind,
    /// Byte offset into the input just after the offending character.
    pub position: usize,
}
