//! Element and attribute name checks.
//!
//! The tokenizer accepts almost anything as a tag or attribute name (`<a"b>`
//! is a start tag named `a"b`). Anything that reaches the output must be a
//! name every HTML parser reads back the same way, so both the policy builder
//! and the renderer use these predicates.

/// Returns true for names of the form `[a-z][a-z0-9-]*` (ASCII, any case).
#[must_use]
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Returns true for names of the form `[a-z][a-z0-9_:-]*` (ASCII, any case).
#[must_use]
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

/// Returns true for `on*` attributes, which carry script in every browser.
#[must_use]
pub fn is_event_handler_attribute(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}
