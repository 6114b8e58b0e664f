//! Integration tests for URL scheme analysis.

use sanitas_common::url::{UrlScheme, is_valid_scheme, scheme_of, strip_url};

fn scheme(input: &str) -> UrlScheme {
    scheme_of(&strip_url(input))
}

#[test]
fn test_relative_urls() {
    assert_eq!(scheme("page.html"), UrlScheme::Relative);
    assert_eq!(scheme("/docs/index.html"), UrlScheme::Relative);
    assert_eq!(scheme("//example.com/x"), UrlScheme::Relative);
    assert_eq!(scheme(""), UrlScheme::Relative);
}

#[test]
fn test_named_schemes() {
    assert_eq!(scheme("http://example.com"), UrlScheme::Named("http".into()));
    assert_eq!(scheme("mailto:a@b.c"), UrlScheme::Named("mailto".into()));
    assert_eq!(scheme(":nothing"), UrlScheme::Named(String::new()));
}

#[test]
fn test_javascript_disguises() {
    let javascript = UrlScheme::Named("javascript".into());
    assert_eq!(scheme("JaVaScRiPt:alert(1)"), javascript);
    assert_eq!(scheme("  javascript:alert(1)"), javascript);
    assert_eq!(scheme("\u{1}\u{2}javascript:alert(1)"), javascript);
    assert_eq!(scheme("java\tscript:alert(1)"), javascript);
    assert_eq!(scheme("java\nscr\ript:alert(1)"), javascript);
}

#[test]
fn test_strip_url() {
    assert_eq!(strip_url("  http://a/b \n"), "http://a/b");
    assert_eq!(strip_url("a\tb\nc"), "abc");
    // Interior spaces are not removed; browsers percent-encode them.
    assert_eq!(strip_url("a b"), "a b");
}

#[test]
fn test_valid_scheme() {
    assert!(is_valid_scheme("http"));
    assert!(is_valid_scheme("svn+ssh"));
    assert!(!is_valid_scheme(""));
    assert!(!is_valid_scheme("1http"));
    assert!(!is_valid_scheme("ht tp"));
}
