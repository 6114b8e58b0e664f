//! Tests for the named character reference table.

use sanitas_html::tokenizer::named_character_references::{longest_entity_prefix, lookup_entity};

#[test]
fn test_lookup_with_semicolon() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("hellip;"), Some("\u{2026}"));
    assert_eq!(lookup_entity("fjlig;"), Some("fj"));
}

#[test]
fn test_legacy_entities_match_without_semicolon() {
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
    assert_eq!(lookup_entity("yuml"), Some("\u{00FF}"));
}

#[test]
fn test_modern_entities_require_semicolon() {
    assert_eq!(lookup_entity("apos"), None);
    assert_eq!(lookup_entity("hellip"), None);
    assert_eq!(lookup_entity("colon"), None);
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("Delta;"), Some("\u{0394}"));
    assert_eq!(lookup_entity("delta;"), Some("\u{03B4}"));
    assert_eq!(lookup_entity("AMP;"), Some("&"));
    assert_eq!(lookup_entity("Amp;"), None);
}

#[test]
fn test_unknown_entity() {
    assert_eq!(lookup_entity("bogus;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_longest_prefix_prefers_semicolon_form() {
    assert_eq!(longest_entity_prefix("notin; rest"), Some((6, "\u{2209}")));
    assert_eq!(longest_entity_prefix("amp;amp;"), Some((4, "&")));
}

#[test]
fn test_longest_prefix_falls_back_to_legacy() {
    assert_eq!(longest_entity_prefix("notit;"), Some((3, "\u{00AC}")));
    assert_eq!(longest_entity_prefix("ampersand"), Some((3, "&")));
}

#[test]
fn test_longest_prefix_without_match() {
    assert_eq!(longest_entity_prefix("bogus;"), None);
    assert_eq!(longest_entity_prefix("hellip"), None);
    assert_eq!(longest_entity_prefix(";"), None);
    assert_eq!(longest_entity_prefix(""), None);
}

#[test]
fn test_obfuscation_entities() {
    assert_eq!(longest_entity_prefix("colon;alert(1)"), Some((6, ":")));
    assert_eq!(longest_entity_prefix("Tab;"), Some((4, "\t")));
    assert_eq!(longest_entity_prefix("NewLine;"), Some((8, "\n")));
}
