//! Attribute value validators.
//!
//! A validator is a pure function from an attribute value to either the value
//! to emit or nothing, in which case the attribute is removed.

use sanitas_common::url::{UrlScheme, scheme_of, strip_url};
use serde::{Deserialize, Serialize};

/// Schemes allowed by [`AttributeValidator::web_url`].
pub const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

const fn default_true() -> bool {
    true
}

/// Constraint on the value of one attribute.
///
/// Serialized with a `kind` tag, e.g.
/// `{"kind": "url", "schemes": ["https"], "allow_relative": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeValidator {
    /// Any value.
    Any,
    /// Free text of at most `max_len` characters.
    Text {
        /// Maximum length in characters.
        max_len: usize,
    },
    /// One of a fixed set of keywords, matched ASCII case-insensitively.
    /// The value is rewritten to the keyword as listed.
    OneOf {
        /// The accepted keywords.
        values: Vec<String>,
    },
    /// A base-10 integer within `min..=max`.
    Integer {
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
    /// A URL whose scheme is in `schemes`, or a relative URL if
    /// `allow_relative` is set.
    Url {
        /// Accepted schemes, lowercase, without the colon.
        schemes: Vec<String>,
        /// Whether URLs without a scheme are accepted.
        #[serde(default = "default_true")]
        allow_relative: bool,
    },
}

impl AttributeValidator {
    /// A URL validator for the given schemes that also accepts relative URLs.
    #[must_use]
    pub fn url(schemes: &[&str]) -> Self {
        Self::Url {
            schemes: schemes.iter().map(|s| s.to_ascii_lowercase()).collect(),
            allow_relative: true,
        }
    }

    /// `http`, `https`, `mailto` and relative URLs.
    #[must_use]
    pub fn web_url() -> Self {
        Self::url(DEFAULT_URL_SCHEMES)
    }

    /// Free text up to `max_len` characters.
    #[must_use]
    pub const fn text(max_len: usize) -> Self {
        Self::Text { max_len }
    }

    /// One of the given keywords.
    #[must_use]
    pub fn one_of(values: &[&str]) -> Self {
        Self::OneOf {
            values: values.iter().map(ToString::to_string).collect(),
        }
    }

    /// An integer in `min..=max`.
    #[must_use]
    pub const fn integer(min: i64, max: i64) -> Self {
        Self::Integer { min, max }
    }

    /// Check `value`, returning the value to emit if it is acceptable.
    #[must_use]
    pub fn validate(&self, value: &str) -> Option<String> {
        match self {
            Self::Any => Some(value.to_string()),
            Self::Text { max_len } => {
                (value.chars().count() <= *max_len).then(|| value.to_string())
            }
            Self::OneOf { values } => {
                let value = value.trim();
                values
                    .iter()
                    .find(|allowed| allowed.eq_ignore_ascii_case(value))
                    .cloned()
            }
            Self::Integer { min, max } => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| (*min..=*max).contains(n))
                .map(|n| n.to_string()),
            Self::Url {
                schemes,
                allow_relative,
            } => {
                // The stripped form is what a browser parses.
                let url = strip_url(value);
                let accepted = match scheme_of(&url) {
                    UrlScheme::Relative => *allow_relative,
                    UrlScheme::Named(scheme) => {
                        schemes.iter().any(|allowed| allowed.eq_ignore_ascii_case(&scheme))
                    }
                };
                accepted.then_some(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_rejects_script_schemes() {
        let v = AttributeValidator::web_url();
        assert_eq!(v.validate("javascript:alert(1)"), None);
        assert_eq!(v.validate("JaVaScRiPt:alert(1)"), None);
        assert_eq!(v.validate(" \u{1}java\tscript:alert(1)"), None);
        assert_eq!(v.validate("vbscript:x"), None);
        assert_eq!(v.validate("data:text/html,x"), None);
    }

    #[test]
    fn test_url_accepts_allowed_and_relative() {
        let v = AttributeValidator::web_url();
        assert_eq!(v.validate("https://a.example/"), Some("https://a.example/".to_string()));
        assert_eq!(v.validate("MAILTO:x@y"), Some("MAILTO:x@y".to_string()));
        assert_eq!(v.validate("/docs/a:b"), Some("/docs/a:b".to_string()));
        assert_eq!(v.validate("  page.html\n"), Some("page.html".to_string()));
    }

    #[test]
    fn test_url_without_relative() {
        let v = AttributeValidator::Url {
            schemes: vec!["https".to_string()],
            allow_relative: false,
        };
        assert_eq!(v.validate("/x"), None);
        assert_eq!(v.validate("https://x"), Some("https://x".to_string()));
    }

    #[test]
    fn test_one_of_normalizes() {
        let v = AttributeValidator::one_of(&["ltr", "rtl"]);
        assert_eq!(v.validate(" RTL "), Some("rtl".to_string()));
        assert_eq!(v.validate("up"), None);
    }

    #[test]
    fn test_integer_range() {
        let v = AttributeValidator::integer(1, 10);
        assert_eq!(v.validate(" 07"), Some("7".to_string()));
        assert_eq!(v.validate("11"), None);
        assert_eq!(v.validate("3px"), None);
    }

    #[test]
    fn test_text_length() {
        let v = AttributeValidator::text(3);
        assert_eq!(v.validate("äöü"), Some("äöü".to_string()));
        assert_eq!(v.validate("abcd"), None);
    }
}
