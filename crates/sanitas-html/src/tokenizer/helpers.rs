//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Event emission ("Emit the current token")
//! - End tag detection for RCDATA, RAWTEXT and script data
//! - Parse error reporting

use sanitas_common::warning::warn_once;

use super::core::{Tokenizer, TokenizerState};
use super::token::{Event, TagKind};
use crate::elements::{TextMode, text_mode_for};
use crate::error::{ParseErrorKind, ParseIssue};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Consume the next input character"
    ///
    /// Returns None once the input is exhausted.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.remaining().chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// The unconsumed part of the input.
    pub(super) fn remaining(&self) -> &str {
        self.input.get(self.current_pos..).unwrap_or_default()
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "If the next few characters are..."
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.remaining().starts_with(target)
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.remaining()
            .as_bytes()
            .get(..target.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(target.as_bytes()))
    }

    /// Consume an ASCII string the caller has already matched.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// CR is included because input is not newline-normalized before tokenizing.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\r' | '\x0C')
    }
}

// =============================================================================
// Event Emission Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// "Emit the current input character as a character token."
    ///
    /// Adjacent characters are coalesced into a single text event, split
    /// every [`Tokenizer::MAX_TEXT_CHUNK`] bytes.
    pub(super) fn emit_character(&mut self, c: char) {
        self.make_room_for_text(c.len_utf8());
        self.pending_text.push(c);
    }

    /// Emit several characters at once, e.g. a decoded character reference.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.make_room_for_text(s.len());
        self.pending_text.push_str(s);
    }

    /// Hand out the collected text if `additional` more bytes would push it
    /// past the chunk size.
    fn make_room_for_text(&mut self, additional: usize) {
        if self.pending_text.len() + additional > Self::MAX_TEXT_CHUNK
            && !self.pending_text.is_empty()
        {
            let text = std::mem::take(&mut self.pending_text);
            self.queue.push_back(Event::Text(text));
        }
    }

    /// Queue an event after any text collected before it.
    pub(super) fn emit_event(&mut self, event: Event) {
        if !self.pending_text.is_empty() {
            let text = std::mem::take(&mut self.pending_text);
            self.queue.push_back(Event::Text(text));
        }
        self.queue.push_back(event);
    }

    /// "Emit the current tag token."
    ///
    /// Emitting a start tag for an RCDATA, RAWTEXT, script or plaintext element
    /// also switches the tokenizer into the matching text state, standing in
    /// for the tree builder's "switch the tokenizer to the ... state" step.
    pub(super) fn emit_current_tag(&mut self) {
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        match tag.kind {
            TagKind::Start => {
                if let Some(mode) = text_mode_for(&tag.name) {
                    self.switch_to(match mode {
                        TextMode::PlainText => TokenizerState::PlainText,
                        other => TokenizerState::Text(other),
                    });
                }
                self.last_start_tag_name = Some(tag.name.clone());
            }
            TagKind::End => {
                // [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !tag.attributes.is_empty() {
                    self.log_parse_error(ParseErrorKind::EndTagWithAttributes);
                }
                // "When an end tag token is emitted with its self-closing flag set,
                // that is an end-tag-with-trailing-solidus parse error."
                if tag.self_closing {
                    self.log_parse_error(ParseErrorKind::EndTagWithTrailingSolidus);
                }
            }
        }
        self.emit_event(tag.into_event());
    }

    /// "Emit the current comment token."
    pub(super) fn emit_current_comment(&mut self) {
        if let Some(data) = self.current_comment.take() {
            self.emit_event(Event::Comment(data));
        }
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_end_of_input(&mut self) {
        self.emit_event(Event::EndOfInput);
    }

    /// "This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The unfinished tag is discarded.
    pub(super) fn eof_in_tag(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInTag);
        self.current_tag = None;
        self.emit_end_of_input();
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    pub(super) fn eof_in_comment(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInComment);
        self.emit_current_comment();
        self.emit_end_of_input();
    }

    /// "Append ... to the comment token's data."
    pub(super) fn append_to_comment(&mut self, s: &str) {
        if let Some(ref mut comment) = self.current_comment {
            comment.push_str(s);
        }
    }

    /// "Append the current input character to the comment token's data."
    pub(super) fn append_char_to_comment(&mut self, c: char) {
        if let Some(ref mut comment) = self.current_comment {
            comment.push(c);
        }
    }
}

// =============================================================================
// RCDATA/RAWTEXT Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_tag) {
            (Some(last_start_tag), Some(tag)) => {
                tag.kind == TagKind::End && &tag.name == last_start_tag
            }
            _ => false,
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer... Reconsume in the RCDATA state."
    pub(super) fn emit_text_end_tag_name_anything_else(&mut self, mode: TextMode) {
        self.emit_character('<');
        self.emit_character('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_str(&buffer);
        self.current_tag = None;
        self.reconsume_in(TokenizerState::Text(mode));
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same name,
    /// then this is a duplicate-attribute parse error and the new attribute must
    /// be removed from the token."
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_tag
            .as_mut()
            .is_some_and(super::token::TagToken::finish_attribute_name);
        if is_duplicate {
            self.log_parse_error(ParseErrorKind::DuplicateAttribute);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error and reports it through the warning system.
    /// Once [`Tokenizer::MAX_RECORDED_ISSUES`] are stored, further errors are
    /// only counted.
    /// Parse errors are not fatal; the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&mut self, kind: ParseErrorKind) {
        if self.issues.len() < Self::MAX_RECORDED_ISSUES {
            self.issues.push(ParseIssue {
                kind,
                position: self.current_pos,
            });
        } else {
            self.dropped_issues += 1;
        }
        warn_once("HTML Tokenizer", &format!("{kind} parse error"));
    }
}
