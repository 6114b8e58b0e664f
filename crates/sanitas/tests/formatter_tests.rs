//! Tests for the formatter adapter, the registry and host configuration.

use std::path::Path;

use sanitas::formatter::FormatterFactory;
use sanitas::{
    Config, ConfigError, EscapedFormatter, FormatterRegistry, LexicalError, MarkupFormatter,
    RawHtmlConfig, RawHtmlFormatter, TranslateError,
};
use serde_json::json;

#[test]
fn test_raw_html_formatter_defaults() {
    let formatter = RawHtmlFormatter::default();
    assert_eq!(formatter.name(), "raw-html");
    assert_eq!(formatter.display_name(), "Safe HTML");
    assert_eq!(formatter.code_mirror_mode(), Some("htmlmixed"));
    assert_eq!(formatter.code_mirror_config(), Some("mode:'text/html'"));
    assert!(!formatter.config().disable_syntax_highlighting);
}

#[test]
fn test_disabling_syntax_highlighting() {
    let formatter = RawHtmlFormatter::new(RawHtmlConfig {
        disable_syntax_highlighting: true,
    });
    assert_eq!(formatter.code_mirror_mode(), None);
    assert_eq!(formatter.code_mirror_config(), Some("mode:'text/html'"));
}

#[test]
fn test_raw_html_translates() {
    let formatter = RawHtmlFormatter::default_instance();
    assert_eq!(
        formatter
            .translate_to_string(r#"<a href="javascript:alert(1)">x</a>"#)
            .expect("translates"),
        "<a>x</a>"
    );
    let mut sink = Vec::new();
    formatter
        .translate("<p>unterminated", &mut sink)
        .expect("translates");
    assert_eq!(sink, b"<p>unterminated</p>");
}

#[test]
fn test_escaped_formatter() {
    let formatter = EscapedFormatter;
    assert_eq!(formatter.name(), "escaped");
    assert_eq!(formatter.code_mirror_mode(), None);
    assert_eq!(
        formatter
            .translate_to_string("<b>a  b</b>\r\nc\rd\ne 'q\"")
            .expect("translates"),
        "&lt;b&gt;a &nbsp;b&lt;/b&gt;<br>c<br>d<br>e &#39;q&quot;"
    );
}

#[test]
fn test_from_null_options() {
    let formatter = RawHtmlFormatter::from_options(&serde_json::Value::Null).expect("defaults");
    assert_eq!(formatter.limits(), sanitas::Limits::default());
    assert_eq!(formatter.code_mirror_mode(), Some("htmlmixed"));
}

#[test]
fn test_from_options_with_policy_and_limits() {
    let formatter = RawHtmlFormatter::from_options(&json!({
        "disable_syntax_highlighting": true,
        "policy": { "elements": { "b": { "allowed": true } } },
        "limits": { "max_input_bytes": 64 }
    }))
    .expect("valid options");
    assert_eq!(formatter.code_mirror_mode(), None);
    assert!(formatter.policy().allows_element("b"));
    assert!(!formatter.policy().allows_element("i"));
    assert_eq!(
        formatter
            .translate_to_string("<b>x</b><i>y</i>")
            .expect("translates"),
        "<b>x</b>y"
    );
    let result = formatter.translate_to_string(&"x".repeat(65));
    assert!(matches!(
        result,
        Err(TranslateError::Lexical(LexicalError::InputTooLarge { .. }))
    ));
}

#[test]
fn test_from_options_rejects_bad_input() {
    assert!(matches!(
        RawHtmlFormatter::from_options(&json!({ "limits": 5 })),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        RawHtmlFormatter::from_options(&json!({
            "policy": { "global_attributes": { "onclick": { "kind": "any" } } }
        })),
        Err(ConfigError::Policy(_))
    ));
}

#[test]
fn test_builtin_registry() {
    let registry = FormatterRegistry::with_builtin();
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["escaped", "raw-html"]);
    assert!(registry.contains("raw-html"));

    let formatter = registry
        .create("raw-html", &serde_json::Value::Null)
        .expect("registered");
    assert_eq!(formatter.name(), "raw-html");
}

#[test]
fn test_unknown_formatter() {
    let registry = FormatterRegistry::with_builtin();
    let Err(ConfigError::UnknownFormatter { name, registered }) =
        registry.create("markdown", &serde_json::Value::Null)
    else {
        panic!("Expected UnknownFormatter");
    };
    assert_eq!(name, "markdown");
    assert_eq!(registered, "escaped, raw-html");
}

#[test]
fn test_custom_registration() {
    let mut registry = FormatterRegistry::new();
    assert!(!registry.contains("escaped"));

    let factory: FormatterFactory = |_| Ok(Box::new(EscapedFormatter));
    assert!(registry.register("text", factory).is_none());
    assert!(registry.register("text", factory).is_some());

    let formatter = registry
        .create("text", &serde_json::Value::Null)
        .expect("registered");
    assert_eq!(
        formatter.translate_to_string("<x>").expect("translates"),
        "&lt;x&gt;"
    );
}

#[test]
fn test_config_defaults() {
    let config = Config::from_json_str("{}").expect("valid");
    assert_eq!(config, Config::default());
    assert_eq!(config.formatter, "raw-html");
}

#[test]
fn test_config_builds_formatter() {
    let config = Config::from_json_str(
        r#"{ "formatter": "raw-html", "options": { "disable_syntax_highlighting": true } }"#,
    )
    .expect("valid");
    let formatter = config
        .build_formatter(&FormatterRegistry::with_builtin())
        .expect("builds");
    assert_eq!(formatter.code_mirror_mode(), None);
}

#[test]
fn test_config_errors() {
    assert!(matches!(
        Config::from_json_str("[1, 2]"),
        Err(ConfigError::Json(_))
    ));
    let missing = Path::new("/nonexistent/sanitas/config.json");
    let Err(ConfigError::Io { path, .. }) = Config::load(missing) else {
        panic!("Expected Io error");
    };
    assert_eq!(path, missing);
}

#[test]
fn test_formatters_are_shareable() {
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn MarkupFormatter>();
    assert_send_sync::<FormatterRegistry>();
}
