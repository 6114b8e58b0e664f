//! Character reference states for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through
//! [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)

use super::core::{Tokenizer, TokenizerState};
use super::named_character_references::longest_entity_prefix;
use crate::error::ParseErrorKind;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: &[(u32, u32)] = &[
    (0x80, 0x20AC), // EURO SIGN
    (0x82, 0x201A), // SINGLE LOW-9 QUOTATION MARK
    (0x83, 0x0192), // LATIN SMALL LETTER F WITH HOOK
    (0x84, 0x201E), // DOUBLE LOW-9 QUOTATION MARK
    (0x85, 0x2026), // HORIZONTAL ELLIPSIS
    (0x86, 0x2020), // DAGGER
    (0x87, 0x2021), // DOUBLE DAGGER
    (0x88, 0x02C6), // MODIFIER LETTER CIRCUMFLEX ACCENT
    (0x89, 0x2030), // PER MILLE SIGN
    (0x8A, 0x0160), // LATIN CAPITAL LETTER S WITH CARON
    (0x8B, 0x2039), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    (0x8C, 0x0152), // LATIN CAPITAL LIGATURE OE
    (0x8E, 0x017D), // LATIN CAPITAL LETTER Z WITH CARON
    (0x91, 0x2018), // LEFT SINGLE QUOTATION MARK
    (0x92, 0x2019), // RIGHT SINGLE QUOTATION MARK
    (0x93, 0x201C), // LEFT DOUBLE QUOTATION MARK
    (0x94, 0x201D), // RIGHT DOUBLE QUOTATION MARK
    (0x95, 0x2022), // BULLET
    (0x96, 0x2013), // EN DASH
    (0x97, 0x2014), // EM DASH
    (0x98, 0x02DC), // SMALL TILDE
    (0x99, 0x2122), // TRADE MARK SIGN
    (0x9A, 0x0161), // LATIN SMALL LETTER S WITH CARON
    (0x9B, 0x203A), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    (0x9C, 0x0153), // LATIN SMALL LIGATURE OE
    (0x9E, 0x017E), // LATIN SMALL LETTER Z WITH CARON
    (0x9F, 0x0178), // LATIN CAPITAL LETTER Y WITH DIAERESIS
];

impl Tokenizer<'_> {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Returns true if the return state is an attribute value state.
    /// Per spec: "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    fn flush_code_points(&mut self, code_points: &str) {
        if self.is_consumed_as_part_of_attribute() {
            if let Some(ref mut tag) = self.current_tag {
                tag.append_str_to_current_attribute_value(code_points);
            }
        } else {
            self.emit_str(code_points);
        }
    }

    /// Flush the temporary buffer and clear it.
    fn flush_temporary_buffer(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.flush_code_points(&buffer);
    }

    /// "Switch to the return state" / "Reconsume in the return state".
    fn leave_character_reference(&mut self, reconsume: bool) {
        let return_state = self.return_state.take().unwrap_or(TokenizerState::Data);
        if reconsume {
            self.reconsume_in(return_state);
        } else {
            self.switch_to(return_state);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.flush_temporary_buffer();
                self.leave_character_reference(true);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// Entered by reconsuming the first alphanumeric, so the candidate name
    /// starts at the current input character. The match is found by looking
    /// ahead in the input instead of consuming one character at a time.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let first_len = self.current_input_character.map_or(0, char::len_utf8);
        let name_start = self.current_pos - first_len;
        let candidate = self.input.get(name_start..).unwrap_or_default();

        // "Otherwise - Flush code points consumed as a character reference.
        // Switch to the ambiguous ampersand state."
        // Only the '&' has been consumed as part of the reference; the first
        // alphanumeric is handed to the ambiguous ampersand state.
        let Some((match_len, replacement)) = longest_entity_prefix(candidate) else {
            self.flush_temporary_buffer();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        // "Consume the maximum number of characters possible ... Append each
        // character to the temporary buffer when it's consumed."
        let matched = candidate.get(..match_len).unwrap_or_default();
        self.temporary_buffer.push_str(matched);
        self.current_pos = name_start + match_len;
        let last_char_is_semicolon = matched.ends_with(';');

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;), and
        // the next input character is either a U+003D EQUALS SIGN character (=)
        // or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return state."
        if self.is_consumed_as_part_of_attribute() && !last_char_is_semicolon {
            let next = self.remaining().chars().next();
            if next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
                self.flush_temporary_buffer();
                self.leave_character_reference(false);
                return;
            }
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        if !last_char_is_semicolon {
            self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name to the
        // temporary buffer. Flush code points consumed as a character reference.
        // Switch to the return state."
        self.temporary_buffer.clear();
        self.flush_code_points(replacement);
        self.leave_character_reference(false);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric - If the character reference was consumed as part
            // of an attribute, then append the current input character to the
            // current attribute's value. Otherwise, emit the current input
            // character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                let mut buf = [0; 4];
                self.flush_code_points(c.encode_utf8(&mut buf));
            }
            // "U+003B SEMICOLON (;) - This is an unknown-named-character-reference
            // parse error. Reconsume in the return state."
            Some(';') => {
                self.log_parse_error(ParseErrorKind::UnknownNamedCharacterReference);
                self.leave_character_reference(true);
            }
            // "Anything else - Reconsume in the return state."
            _ => {
                self.leave_character_reference(true);
            }
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;

        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X - Append
            // the current input character to the temporary buffer. Switch to the
            // hexadecimal character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else - Reconsume in the decimal character reference start state."
            _ => {
                self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart);
            }
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            // "ASCII hex digit - Reconsume in the hexadecimal character reference state."
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            // "Anything else - This is an absence-of-digits-in-numeric-character-reference
            // parse error. Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.log_parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_temporary_buffer();
                self.leave_character_reference(true);
            }
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            // "ASCII digit - Reconsume in the decimal character reference state."
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            // "Anything else - This is an absence-of-digits-in-numeric-character-reference
            // parse error. Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.log_parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_temporary_buffer();
                self.leave_character_reference(true);
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.handle_digits(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.handle_digits(10);
    }

    /// Shared body of the hexadecimal and decimal character reference states.
    fn handle_digits(&mut self, radix: u32) {
        match self.current_input_character {
            // "ASCII digit - Multiply the character reference code by 10 (or 16).
            // Add a numeric version of the current input character to the
            // character reference code."
            // Saturates instead of overflowing; anything past U+10FFFF is
            // replaced in the end state either way.
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or_default();
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            // "U+003B SEMICOLON - Switch to the numeric character reference end state."
            Some(';') => {
                self.finish_numeric_character_reference();
                self.leave_character_reference(false);
            }
            // "Anything else - This is a missing-semicolon-after-character-reference
            // parse error. Reconsume in the numeric character reference end state."
            _ => {
                self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                self.finish_numeric_character_reference();
                self.leave_character_reference(true);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// The end state consumes nothing, so it runs inline and the caller goes
    /// straight back to the return state.
    fn finish_numeric_character_reference(&mut self) {
        let code = self.character_reference_code;

        let resolved = match code {
            // "If the number is 0x00, then this is a null-character-reference parse
            // error. Set the character reference code to 0xFFFD."
            0 => {
                self.log_parse_error(ParseErrorKind::NullCharacterReference);
                0xFFFD
            }
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error."
            c if c > 0x0010_FFFF => {
                self.log_parse_error(ParseErrorKind::CharacterReferenceOutsideUnicodeRange);
                0xFFFD
            }
            // "If the number is a surrogate, then this is a
            // surrogate-character-reference parse error."
            0xD800..=0xDFFF => {
                self.log_parse_error(ParseErrorKind::SurrogateCharacterReference);
                0xFFFD
            }
            c => {
                // "If the number is a noncharacter, then this is a
                // noncharacter-character-reference parse error."
                if (0xFDD0..=0xFDEF).contains(&c) || c & 0xFFFE == 0xFFFE {
                    self.log_parse_error(ParseErrorKind::NoncharacterCharacterReference);
                }
                // "If the number is 0x0D, or a control that's not ASCII whitespace,
                // then this is a control-character-reference parse error."
                let is_control = c <= 0x1F || (0x7F..=0x9F).contains(&c);
                let is_whitespace = matches!(c, 0x09 | 0x0A | 0x0C | 0x20);
                if c == 0x0D || (is_control && !is_whitespace) {
                    self.log_parse_error(ParseErrorKind::ControlCharacterReference);
                }
                C1_REPLACEMENTS
                    .iter()
                    .find(|&&(from, _)| from == c)
                    .map_or(c, |&(_, to)| to)
            }
        };

        // "Set the temporary buffer to the empty string. Append a code point equal
        // to the character reference code to the temporary buffer. Flush code
        // points consumed as a character reference."
        self.temporary_buffer.clear();
        let ch = char::from_u32(resolved).unwrap_or('\u{FFFD}');
        let mut buf = [0; 4];
        self.flush_code_points(ch.encode_utf8(&mut buf));
    }
}
