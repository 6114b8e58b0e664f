//! Integration tests for policy construction and evaluation.

use sanitas_html::Attribute;
use sanitas_policy::presets::{basic_formatting, rich_text};
use sanitas_policy::{AttributeValidator, Decision, Disposition, Policy, PolicyError};

/// Helper to build a policy that allows links with http/https hrefs
fn link_policy() -> Policy {
    Policy::builder()
        .allow_elements(["a", "b", "p"])
        .allow_url_schemes(["http", "https"])
        .allow_url_attributes(["href"])
        .on_elements(["a"])
        .allow_attributes(["title"])
        .matching(AttributeValidator::text(20))
        .globally()
        .build()
        .expect("valid policy")
}

/// Helper to evaluate and unwrap an Allow decision
fn allowed(policy: &Policy, element: &str, attributes: &[Attribute]) -> (String, Vec<Attribute>) {
    match policy.evaluate(element, attributes) {
        Decision::Allow { name, attributes } => (name, attributes),
        Decision::Reject(d) => panic!("Expected Allow for <{element}>, got Reject({d})"),
    }
}

#[test]
fn test_allowed_element_without_attributes() {
    let (name, attrs) = allowed(&link_policy(), "b", &[]);
    assert_eq!(name, "b");
    assert!(attrs.is_empty());
}

#[test]
fn test_script_is_dropped_with_content() {
    assert_eq!(
        link_policy().evaluate("script", &[]),
        Decision::Reject(Disposition::DropElementAndContent)
    );
    assert_eq!(
        link_policy().evaluate("STYLE", &[]),
        Decision::Reject(Disposition::DropElementAndContent)
    );
}

#[test]
fn test_unknown_element_keeps_text_by_default() {
    assert_eq!(
        link_policy().evaluate("blink", &[]),
        Decision::Reject(Disposition::DropTagKeepText)
    );
}

#[test]
fn test_explicit_disposition_wins() {
    let policy = Policy::builder()
        .disposition("blink", Disposition::DropElementAndContent)
        .disposition("script", Disposition::DropTagKeepText)
        .default_disposition(Disposition::DropElementAndContent)
        .build()
        .expect("valid policy");
    assert_eq!(policy.disposition_for("blink"), Disposition::DropElementAndContent);
    assert_eq!(policy.disposition_for("script"), Disposition::DropTagKeepText);
    assert_eq!(policy.disposition_for("marquee"), Disposition::DropElementAndContent);
    assert!(!policy.allows_element("blink"));
}

#[test]
fn test_javascript_href_is_removed() {
    let (name, attrs) = allowed(
        &link_policy(),
        "a",
        &[Attribute::new("href", "javascript:alert(1)")],
    );
    assert_eq!(name, "a");
    assert!(attrs.is_empty());
}

#[test]
fn test_disguised_javascript_href_is_removed() {
    for href in [
        "JAVASCRIPT:alert(1)",
        "  javascript:alert(1)",
        "java\nscript:alert(1)",
        "\u{0}javascript:alert(1)",
        "jav\tascript:alert(1)",
    ] {
        let (_, attrs) = allowed(&link_policy(), "a", &[Attribute::new("href", href)]);
        assert!(attrs.is_empty(), "{href:?} survived");
    }
}

#[test]
fn test_https_and_relative_hrefs_are_kept() {
    let (_, attrs) = allowed(
        &link_policy(),
        "a",
        &[Attribute::new("href", "https://example.com/?a=1")],
    );
    assert_eq!(attrs, vec![Attribute::new("href", "https://example.com/?a=1")]);

    let (_, attrs) = allowed(&link_policy(), "a", &[Attribute::new("href", "../up")]);
    assert_eq!(attrs, vec![Attribute::new("href", "../up")]);
}

#[test]
fn test_mailto_not_in_custom_scheme_list() {
    let (_, attrs) = allowed(&link_policy(), "a", &[Attribute::new("href", "mailto:a@b")]);
    assert!(attrs.is_empty());
}

#[test]
fn test_element_attribute_not_allowed_elsewhere() {
    let (_, attrs) = allowed(&link_policy(), "p", &[Attribute::new("href", "/x")]);
    assert!(attrs.is_empty());
}

#[test]
fn test_global_attribute_and_order() {
    let (_, attrs) = allowed(
        &link_policy(),
        "a",
        &[
            Attribute::new("title", "t"),
            Attribute::new("style", "color:red"),
            Attribute::new("href", "/x"),
        ],
    );
    assert_eq!(
        attrs,
        vec![Attribute::new("title", "t"), Attribute::new("href", "/x")]
    );
}

#[test]
fn test_failing_validator_removes_attribute() {
    let (_, attrs) = allowed(
        &link_policy(),
        "b",
        &[Attribute::new("title", "far too long for twenty chars")],
    );
    assert!(attrs.is_empty());
}

#[test]
fn test_event_handlers_never_pass() {
    let policy = Policy::builder()
        .allow_elements(["b"])
        .allow_attributes(["title"])
        .globally()
        .build()
        .expect("valid policy");
    let (_, attrs) = allowed(
        &policy,
        "b",
        &[Attribute::new("onclick", "x()"), Attribute::new("title", "t")],
    );
    assert_eq!(attrs, vec![Attribute::new("title", "t")]);
}

#[test]
fn test_first_duplicate_decides() {
    let (_, attrs) = allowed(
        &link_policy(),
        "a",
        &[
            Attribute::new("href", "javascript:x"),
            Attribute::new("HREF", "https://ok"),
        ],
    );
    assert!(attrs.is_empty());
}

#[test]
fn test_rename() {
    let (name, _) = allowed(&rich_text(), "center", &[]);
    assert_eq!(name, "div");
    let (name, _) = allowed(&rich_text(), "FONT", &[]);
    assert_eq!(name, "span");
}

#[test]
fn test_builder_rejects_event_handler() {
    let result = Policy::builder()
        .allow_elements(["a"])
        .allow_attributes(["onmouseover"])
        .on_elements(["a"])
        .build();
    assert!(matches!(result, Err(PolicyError::EventHandlerAttribute(name)) if name == "onmouseover"));
}

#[test]
fn test_builder_rejects_invalid_names() {
    assert!(matches!(
        Policy::builder().allow_elements(["a b"]).build(),
        Err(PolicyError::InvalidElementName(_))
    ));
    assert!(matches!(
        Policy::builder()
            .allow_attributes(["x=y"])
            .globally()
            .build(),
        Err(PolicyError::InvalidAttributeName(_))
    ));
    assert!(matches!(
        Policy::builder().rename_element("b", "<i>").build(),
        Err(PolicyError::InvalidElementName(_))
    ));
}

#[test]
fn test_builder_rejects_bad_scheme_and_plaintext() {
    assert!(matches!(
        Policy::builder()
            .allow_url_schemes(["java script"])
            .allow_url_attributes(["href"])
            .on_elements(["a"])
            .build(),
        Err(PolicyError::InvalidScheme(_))
    ));
    assert!(matches!(
        Policy::builder().allow_elements(["plaintext"]).build(),
        Err(PolicyError::UnsupportedElement(_))
    ));
}

#[test]
fn test_builder_rejects_empty_integer_range() {
    assert!(matches!(
        Policy::builder()
            .allow_attributes(["width"])
            .matching(AttributeValidator::integer(10, 1))
            .globally()
            .build(),
        Err(PolicyError::InvalidValidator { .. })
    ));
}

#[test]
fn test_names_are_normalized() {
    let policy = Policy::builder()
        .allow_elements(["B"])
        .allow_attributes(["TITLE"])
        .on_elements(["B"])
        .build()
        .expect("valid policy");
    assert!(policy.allows_element("b"));
    let (_, attrs) = allowed(&policy, "b", &[Attribute::new("Title", "x")]);
    assert_eq!(attrs, vec![Attribute::new("title", "x")]);
}

#[test]
fn test_json_round_trip() {
    let policy = rich_text();
    let json = policy.to_json_pretty().expect("serializable");
    let reloaded = Policy::from_json(&json).expect("round trip");
    assert_eq!(reloaded, policy);
}

#[test]
fn test_from_json() {
    let policy = Policy::from_json(
        r#"{
            "elements": {
                "a": { "allowed": true, "attributes": { "href": { "kind": "url", "schemes": ["HTTPS"] } } },
                "marquee": { "disposition": "drop_element_and_content" }
            },
            "global_attributes": { "dir": { "kind": "one_of", "values": ["ltr", "rtl"] } }
        }"#,
    )
    .expect("valid JSON policy");

    let (_, attrs) = allowed(
        &policy,
        "a",
        &[Attribute::new("href", "https://x"), Attribute::new("dir", "RTL")],
    );
    assert_eq!(
        attrs,
        vec![Attribute::new("href", "https://x"), Attribute::new("dir", "rtl")]
    );
    assert_eq!(
        policy.evaluate("marquee", &[]),
        Decision::Reject(Disposition::DropElementAndContent)
    );
    assert_eq!(
        policy.evaluate("blink", &[]),
        Decision::Reject(Disposition::DropTagKeepText)
    );
}

#[test]
fn test_from_json_rejects_event_handler() {
    let result = Policy::from_json(
        r#"{ "global_attributes": { "onload": { "kind": "any" } } }"#,
    );
    assert!(matches!(result, Err(PolicyError::EventHandlerAttribute(_))));
}

#[test]
fn test_from_json_rejects_malformed() {
    assert!(matches!(Policy::from_json("{"), Err(PolicyError::Json(_))));
    assert!(matches!(
        Policy::from_json(r#"{ "default_disposition": "explode" }"#),
        Err(PolicyError::Json(_))
    ));
}

#[test]
fn test_disposition_strings() {
    assert_eq!(Disposition::DropElementAndContent.to_string(), "drop_element_and_content");
    assert_eq!(
        "drop_tag_keep_text".parse::<Disposition>().expect("known name"),
        Disposition::DropTagKeepText
    );
}

#[test]
fn test_basic_formatting_has_no_links() {
    let policy = basic_formatting();
    assert!(policy.allows_element("strong"));
    assert!(!policy.allows_element("a"));
    assert!(!policy.allows_element("img"));
}

#[test]
fn test_rich_text_images() {
    let (_, attrs) = allowed(
        &rich_text(),
        "img",
        &[
            Attribute::new("src", "https://x/y.png"),
            Attribute::new("width", "64"),
            Attribute::new("onerror", "alert(1)"),
        ],
    );
    assert_eq!(
        attrs,
        vec![Attribute::new("src", "https://x/y.png"), Attribute::new("width", "64")]
    );
    let (_, attrs) = allowed(&rich_text(), "img", &[Attribute::new("src", "mailto:x")]);
    assert!(attrs.is_empty());
}

#[test]
fn test_policy_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Policy>();
}
