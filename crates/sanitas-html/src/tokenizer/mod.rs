//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard, as a lazy iterator of events.

/// Character reference parsing per § 13.2.5.72 - § 13.2.5.80.
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Events produced by the tokenizer and the tag token under construction.
pub mod token;

pub use self::core::{Tokenizer, TokenizerState, tokenize, tokenize_bytes};
pub use token::{Attribute, Event};
