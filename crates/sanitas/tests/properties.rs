//! Property tests over generated markup.
//!
//! Inputs are stitched together from fragments that exercise the interesting
//! paths (nesting, stray and missing closes, suppressed elements, hostile
//! attributes, entities), since random strings almost never contain tags.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sanitas::{Decision, Event, Policy, rich_text, sanitize};
use sanitas_common::url::{UrlScheme, scheme_of, strip_url};
use sanitas_html::elements::is_void_element;
use sanitas_html::tokenize;

const FRAGMENTS: &[&str] = &[
    "<b>", "</b>", "<i>", "</i>", "<p>", "</p>", "<div>", "</div>", "<ul><li>", "</li></ul>",
    "<br>", "<br/>", "<img src=x onerror=alert(1)>", "<img src=\"https://x/y.png\" alt='a'>",
    "<a href=\"javascript:alert(1)\">", "<a href=\"https://example.com\">", "<a href=' JaVaScRiPt:x'>",
    "<a href=\"&#106;avascript:x\">", "<a href=java&Tab;script:x>", "</a>", "<script>", "</script>",
    "<style>", "</style>", "<svg><script>", "<textarea>", "</textarea>", "<center>", "</center>",
    "<font>", "</font>", "<blink>", "</blink>", "<!-- c -->", "<!--", "-->", "<?php ?>",
    "<!DOCTYPE html>", "<", ">", "&", "&amp;", "&lt;", "&bogus;", "&#0;", "&#x110000;", "\"", "'",
    "`", "text", " ", "\n", "\u{0}", "é", "<b title=\"a\" title=\"b\">", "<p/>", "</br>", "<xmp>",
    "<plaintext>", "<td colspan=2>", "<ul type=DISC>", "<ol start=-3>", "<span dir=rtl>",
];

/// Markup built from [`FRAGMENTS`].
#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 32;
        let mut markup = String::new();
        for _ in 0..len {
            if let Some(fragment) = g.choose(FRAGMENTS) {
                markup.push_str(fragment);
            }
        }
        Self(markup)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Events of already sanitized output, without the end marker.
fn reparse(html: &str) -> Vec<Event> {
    tokenize(html)
        .map(|event| event.expect("sanitized output tokenizes"))
        .filter(|event| !event.is_end_of_input())
        .collect()
}

#[quickcheck]
fn prop_sanitizing_is_idempotent(input: Markup) -> bool {
    let policy = rich_text();
    let Ok(once) = sanitize(&input.0, &policy) else {
        return false;
    };
    sanitize(&once, &policy).is_ok_and(|twice| twice == once)
}

#[quickcheck]
fn prop_output_is_well_formed(input: Markup) -> bool {
    let Ok(html) = sanitize(&input.0, &rich_text()) else {
        return false;
    };
    let mut open = Vec::new();
    for event in reparse(&html) {
        match event {
            Event::OpenTag { name, .. } if !is_void_element(&name) => open.push(name),
            Event::CloseTag { name } => {
                if open.pop().as_deref() != Some(name.as_str()) {
                    return false;
                }
            }
            Event::Comment(_) => return false,
            _ => {}
        }
    }
    open.is_empty()
}

#[quickcheck]
fn prop_output_obeys_policy(input: Markup) -> bool {
    let policy: Policy = rich_text();
    let Ok(html) = sanitize(&input.0, &policy) else {
        return false;
    };
    reparse(&html).into_iter().all(|event| match event {
        Event::OpenTag {
            name, attributes, ..
        } => match policy.evaluate(&name, &attributes) {
            Decision::Allow {
                name: allowed_name,
                attributes: allowed,
            } => allowed_name == name && allowed == attributes,
            Decision::Reject(_) => false,
        },
        _ => true,
    })
}

#[quickcheck]
fn prop_no_javascript_urls(input: Markup) -> bool {
    let Ok(html) = sanitize(&input.0, &rich_text()) else {
        return false;
    };
    reparse(&html).iter().all(|event| match event {
        Event::OpenTag { attributes, .. } => attributes
            .iter()
            .filter(|attribute| matches!(attribute.name.as_str(), "href" | "src" | "cite"))
            .all(|attribute| {
                scheme_of(&strip_url(&attribute.value))
                    != UrlScheme::Named("javascript".to_string())
            }),
        _ => true,
    })
}

#[quickcheck]
fn prop_plain_text_is_escaped(input: String) -> bool {
    if input.contains(['<', '&', '\0']) {
        return true;
    }
    sanitize(&input, &rich_text()).is_ok_and(|html| html == input.replace('>', "&gt;"))
}
