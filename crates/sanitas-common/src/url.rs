//! URL scheme analysis.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! A sanitizer does not need a full URL parser. It needs to find the scheme a
//! browser will see, after the browser's own input cleanup, so that
//! `javascript:` cannot hide behind case, whitespace or control characters.

/// The scheme a URL will be resolved with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlScheme {
    /// No scheme: the URL is resolved against the document's base URL.
    Relative,
    /// An explicit, ASCII-lowercased scheme (may be empty for `:foo`).
    Named(String),
}

/// [URL Standard § 4.4 URL parsing](https://url.spec.whatwg.org/#concept-basic-url-parser)
///
/// STEP 1: "Remove any leading and trailing C0 control or space from input."
///
/// STEP 2: "Remove all ASCII tab or newline from input."
///
/// The returned string is what the browser actually parses, so it is also
/// what a sanitizer should emit.
#[must_use]
pub fn strip_url(input: &str) -> String {
    input
        .trim_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Determine the scheme of an already stripped URL.
///
/// A `:` that appears before the first `/`, `?` or `#` ends the scheme. Every
/// other URL is relative. The scheme is reported even when it contains
/// characters a URL parser would reject; callers decide whether to accept it,
/// and an allow-list never contains such a scheme.
#[must_use]
pub fn scheme_of(url: &str) -> UrlScheme {
    let end = url.find(['/', '?', '#']).unwrap_or(url.len());
    match url[..end].find(':') {
        Some(colon) => UrlScheme::Named(url[..colon].to_ascii_lowercase()),
        None => UrlScheme::Relative,
    }
}

/// [URL Standard § 4.4 scheme start state](https://url.spec.whatwg.org/#scheme-start-state)
///
/// "ASCII alpha, followed by ASCII alphanumeric, U+002B (+), U+002D (-), or
/// U+002E (.)"
#[must_use]
pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_stops_at_path() {
        assert_eq!(scheme_of("/a:b"), UrlScheme::Relative);
        assert_eq!(scheme_of("?q=a:b"), UrlScheme::Relative);
        assert_eq!(scheme_of("#x:y"), UrlScheme::Relative);
    }

    #[test]
    fn test_scheme_is_lowercased() {
        assert_eq!(scheme_of("HTTPS://x"), UrlScheme::Named("https".to_string()));
    }
}
