//! Ready-made policies.
//!
//! Real deployments load their own rules; these cover the common cases and
//! give the tests something realistic to work with.

use std::sync::{Arc, LazyLock};

use crate::policy::Policy;
use crate::validator::AttributeValidator;

const INLINE_ELEMENTS: &[&str] = &[
    "abbr", "b", "br", "cite", "code", "del", "dfn", "em", "i", "ins", "kbd", "mark", "q", "s",
    "samp", "small", "span", "strike", "strong", "sub", "sup", "tt", "u", "var",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "blockquote", "caption", "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "li", "ol", "p", "pre", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    "ul",
];

static SHARED_RICH_TEXT: LazyLock<Arc<Policy>> = LazyLock::new(|| Arc::new(rich_text()));

/// Inline formatting only: bold, italics, code, line breaks and the like.
/// No links, no images, no attributes.
#[must_use]
pub fn basic_formatting() -> Policy {
    Policy::builder()
        .allow_elements(INLINE_ELEMENTS)
        .build_trusted()
}

/// The default for user-written descriptions.
///
/// Block and inline formatting, lists, tables, links (`http`, `https`,
/// `mailto` and relative) and images (`http`, `https` and relative).
/// The legacy `center` and `font` elements come out as `div` and `span`.
#[must_use]
pub fn rich_text() -> Policy {
    Policy::builder()
        .allow_elements(INLINE_ELEMENTS)
        .allow_elements(BLOCK_ELEMENTS)
        .allow_elements(["a", "img"])
        .rename_element("center", "div")
        .rename_element("font", "span")
        .allow_url_attributes(["href"])
        .on_elements(["a"])
        .allow_url_schemes(["http", "https"])
        .allow_url_attributes(["src"])
        .on_elements(["img"])
        .allow_url_attributes(["cite"])
        .on_elements(["blockquote", "q", "del", "ins"])
        .allow_attributes(["alt"])
        .matching(AttributeValidator::text(1024))
        .on_elements(["img"])
        .allow_attributes(["width", "height"])
        .matching(AttributeValidator::integer(0, 10_000))
        .on_elements(["img"])
        .allow_attributes(["colspan", "rowspan"])
        .matching(AttributeValidator::integer(1, 1000))
        .on_elements(["td", "th"])
        .allow_attributes(["start"])
        .matching(AttributeValidator::integer(-1_000_000, 1_000_000))
        .on_elements(["ol"])
        .allow_attributes(["type"])
        .matching(AttributeValidator::one_of(&["disc", "circle", "square"]))
        .on_elements(["ul"])
        .allow_attributes(["title"])
        .matching(AttributeValidator::text(512))
        .globally()
        .allow_attributes(["dir"])
        .matching(AttributeValidator::one_of(&["ltr", "rtl", "auto"]))
        .globally()
        .allow_attributes(["lang"])
        .matching(AttributeValidator::text(35))
        .globally()
        .build_trusted()
}

/// [`rich_text`], built once per process and shared.
#[must_use]
pub fn shared_rich_text() -> Arc<Policy> {
    Arc::clone(&SHARED_RICH_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_pass_validation() {
        for policy in [basic_formatting(), rich_text()] {
            let rebuilt = Policy::from_definition(policy.definition().clone())
                .expect("preset definitions are valid");
            assert_eq!(rebuilt, policy);
        }
    }

    #[test]
    fn test_shared_rich_text_is_shared() {
        assert!(Arc::ptr_eq(&shared_rich_text(), &shared_rich_text()));
    }
}
