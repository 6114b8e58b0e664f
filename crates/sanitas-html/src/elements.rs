//! [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//!
//! "There are six different kinds of elements: void elements, the template
//! element, raw text elements, escapable raw text elements, foreign elements,
//! and normal elements."

use strum_macros::Display;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// How the content of an element is tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TextMode {
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    ///
    /// Text with character references, ended by the matching end tag.
    /// Used for `title` and `textarea`.
    RcData,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Literal text ended by the matching end tag.
    RawText,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ///
    /// Tokenized like RAWTEXT here; the escape states are not implemented.
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    ///
    /// Everything up to the end of input is text.
    PlainText,
}

/// Returns true if the element never has content or an end tag.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// The tokenizer state a start tag switches to, if any.
///
/// Mirrors the tree builder's "switch the tokenizer to the ... state" steps in
/// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody),
/// assuming scripting is enabled (so `noscript` is raw text).
#[must_use]
pub fn text_mode_for(name: &str) -> Option<TextMode> {
    match name {
        "title" | "textarea" => Some(TextMode::RcData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            Some(TextMode::RawText)
        }
        "script" => Some(TextMode::ScriptData),
        "plaintext" => Some(TextMode::PlainText),
        _ => None,
    }
}

/// Returns true if the element's text is written without escaping.
///
/// [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments):
/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element, or if the parent of current node is a
/// noscript element and scripting is enabled for the node, then append the
/// value of current node's data IDL attribute literally."
#[must_use]
pub fn is_raw_text_element(name: &str) -> bool {
    matches!(
        text_mode_for(name),
        Some(TextMode::RawText | TextMode::ScriptData | TextMode::PlainText)
    )
}
