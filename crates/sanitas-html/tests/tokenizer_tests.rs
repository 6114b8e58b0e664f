//! Integration tests for the HTML tokenizer.

use sanitas_html::{Attribute, Event, LexicalError, ParseErrorKind, Tokenizer, tokenize, tokenize_bytes};

/// Helper to tokenize a string and collect every event
fn events(input: &str) -> Vec<Event> {
    tokenize(input)
        .collect::<Result<Vec<_>, _>>()
        .expect("tokenizing a &str never fails")
}

/// Helper to tokenize a string and return the recorded parse errors
fn issue_kinds(input: &str) -> Vec<ParseErrorKind> {
    let mut tokenizer = Tokenizer::new(input);
    for event in tokenizer.by_ref() {
        let _ = event.expect("tokenizing a &str never fails");
    }
    tokenizer.issues().iter().map(|issue| issue.kind).collect()
}

/// Helper to get the attributes of the first event, which must be a start tag
fn first_attributes(input: &str) -> Vec<Attribute> {
    match events(input).into_iter().next() {
        Some(Event::OpenTag { attributes, .. }) => attributes,
        other => panic!("Expected OpenTag, got {other:?}"),
    }
}

#[test]
fn test_plain_text_is_one_event() {
    assert_eq!(events("Hello"), vec![Event::text("Hello"), Event::EndOfInput]);
}

#[test]
fn test_empty_input() {
    assert_eq!(events(""), vec![Event::EndOfInput]);
}

#[test]
fn test_start_tag() {
    let tokens = events("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Event::OpenTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected OpenTag event"),
    }
}

#[test]
fn test_end_tag() {
    assert_eq!(events("</div>"), vec![Event::close("div"), Event::EndOfInput]);
}

#[test]
fn test_self_closing_tag() {
    match &events("<br/>")[0] {
        Event::OpenTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing OpenTag event"),
    }
}

#[test]
fn test_element_with_text() {
    assert_eq!(
        events("<b>hello</b>"),
        vec![
            Event::open("b"),
            Event::text("hello"),
            Event::close("b"),
            Event::EndOfInput
        ]
    );
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = events("<DiV ID=x></DIV>");
    match &tokens[0] {
        Event::OpenTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes, &vec![Attribute::new("id", "x")]);
        }
        _ => panic!("Expected OpenTag event"),
    }
    assert_eq!(tokens[1], Event::close("div"));
}

#[test]
fn test_attribute_quoting_styles() {
    let attrs = first_attributes("<input type=\"text\" name='q' value=plain disabled>");
    assert_eq!(
        attrs,
        vec![
            Attribute::new("type", "text"),
            Attribute::new("name", "q"),
            Attribute::new("value", "plain"),
            Attribute::new("disabled", ""),
        ]
    );
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let attrs = first_attributes("<p id=\"a\" id=\"b\" class=c>");
    assert_eq!(
        attrs,
        vec![Attribute::new("id", "a"), Attribute::new("class", "c")]
    );
    assert!(issue_kinds("<p id=a id=b>").contains(&ParseErrorKind::DuplicateAttribute));
}

#[test]
fn test_duplicate_attribute_at_end_of_tag() {
    let attrs = first_attributes("<p title=x title=y>");
    assert_eq!(attrs, vec![Attribute::new("title", "x")]);
}

#[test]
fn test_end_tag_attributes_are_dropped() {
    assert_eq!(
        events("</b class=x>"),
        vec![Event::close("b"), Event::EndOfInput]
    );
    assert!(issue_kinds("</b class=x>").contains(&ParseErrorKind::EndTagWithAttributes));
}

#[test]
fn test_comment() {
    assert_eq!(
        events("<!-- hi -->"),
        vec![Event::Comment(" hi ".to_string()), Event::EndOfInput]
    );
}

#[test]
fn test_comment_closed_with_bang() {
    assert_eq!(events("<!--a--!>")[0], Event::Comment("a".to_string()));
    assert!(issue_kinds("<!--a--!>").contains(&ParseErrorKind::IncorrectlyClosedComment));
}

#[test]
fn test_unterminated_comment_is_emitted() {
    assert_eq!(
        events("<!--open"),
        vec![Event::Comment("open".to_string()), Event::EndOfInput]
    );
}

#[test]
fn test_doctype_becomes_bogus_comment() {
    assert_eq!(events("<!DOCTYPE html>")[0], Event::Comment("DOCTYPE html".to_string()));
}

#[test]
fn test_processing_instruction_becomes_bogus_comment() {
    assert_eq!(
        events("<?php echo 1 ?>")[0],
        Event::Comment("?php echo 1 ?".to_string())
    );
    assert!(
        issue_kinds("<?x>").contains(&ParseErrorKind::UnexpectedQuestionMarkInsteadOfTagName)
    );
}

#[test]
fn test_cdata_becomes_bogus_comment() {
    assert_eq!(events("<![CDATA[x]]>")[0], Event::Comment("[CDATA[x]]".to_string()));
}

#[test]
fn test_less_than_sign_in_text() {
    assert_eq!(events("a < b"), vec![Event::text("a < b"), Event::EndOfInput]);
}

#[test]
fn test_empty_end_tag_is_ignored() {
    assert_eq!(events("</>"), vec![Event::EndOfInput]);
}

#[test]
fn test_unterminated_tag_is_dropped() {
    assert_eq!(events("<div class=\"x"), vec![Event::EndOfInput]);
    assert_eq!(
        events("ok<div"),
        vec![Event::text("ok"), Event::EndOfInput]
    );
}

#[test]
fn test_null_in_data_is_dropped() {
    assert_eq!(events("a\0b"), vec![Event::text("ab"), Event::EndOfInput]);
    assert!(issue_kinds("a\0b").contains(&ParseErrorKind::UnexpectedNullCharacter));
}

#[test]
fn test_script_content_is_raw() {
    assert_eq!(
        events("<script>if (a < b) x(\"</b>\")</script>"),
        vec![
            Event::open("script"),
            Event::text("if (a < b) x(\"</b>\")"),
            Event::close("script"),
            Event::EndOfInput
        ]
    );
}

#[test]
fn test_style_content_ignores_tags() {
    assert_eq!(
        events("<style><b>p{}</b></style>"),
        vec![
            Event::open("style"),
            Event::text("<b>p{}</b>"),
            Event::close("style"),
            Event::EndOfInput
        ]
    );
}

#[test]
fn test_rcdata_decodes_references() {
    assert_eq!(
        events("<title>a &amp; <b></title>"),
        vec![
            Event::open("title"),
            Event::text("a & <b>"),
            Event::close("title"),
            Event::EndOfInput
        ]
    );
}

#[test]
fn test_plaintext_runs_to_end() {
    assert_eq!(
        events("<plaintext><b>x</plaintext>"),
        vec![
            Event::open("plaintext"),
            Event::text("<b>x</plaintext>"),
            Event::EndOfInput
        ]
    );
}

#[test]
fn test_named_character_references_in_text() {
    assert_eq!(events("a &amp; b")[0], Event::text("a & b"));
    assert_eq!(events("&lt;&gt;&quot;&apos;")[0], Event::text("<>\"'"));
}

#[test]
fn test_legacy_reference_without_semicolon() {
    assert_eq!(events("&copy 2024")[0], Event::text("\u{a9} 2024"));
    assert!(
        issue_kinds("&copy 2024")
            .contains(&ParseErrorKind::MissingSemicolonAfterCharacterReference)
    );
    assert_eq!(events("&notit;")[0], Event::text("\u{ac}it;"));
    assert_eq!(events("&notin;")[0], Event::text("\u{2209}"));
}

#[test]
fn test_unknown_reference_passes_through() {
    assert_eq!(events("&bogus;")[0], Event::text("&bogus;"));
    assert!(issue_kinds("&bogus;").contains(&ParseErrorKind::UnknownNamedCharacterReference));
    assert_eq!(events("AT&T")[0], Event::text("AT&T"));
    assert_eq!(events("a & b")[0], Event::text("a & b"));
    assert_eq!(events("tail &")[0], Event::text("tail &"));
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(events("&#65;&#x42;&#X43;")[0], Event::text("ABC"));
    assert_eq!(events("&#0;")[0], Event::text("\u{FFFD}"));
    assert_eq!(events("&#x110000;")[0], Event::text("\u{FFFD}"));
    assert_eq!(events("&#xD800;")[0], Event::text("\u{FFFD}"));
    assert_eq!(events("&#99999999999999999999;")[0], Event::text("\u{FFFD}"));
}

#[test]
fn test_c1_numeric_references_are_remapped() {
    assert_eq!(events("&#128;&#x99;")[0], Event::text("\u{20AC}\u{2122}"));
    assert!(issue_kinds("&#128;").contains(&ParseErrorKind::ControlCharacterReference));
}

#[test]
fn test_numeric_reference_without_digits() {
    assert_eq!(events("&#;")[0], Event::text("&#;"));
    assert_eq!(events("&#xg")[0], Event::text("&#xg"));
    assert!(
        issue_kinds("&#;").contains(&ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference)
    );
}

#[test]
fn test_numeric_reference_without_semicolon() {
    assert_eq!(events("&#65 x")[0], Event::text("A x"));
}

#[test]
fn test_references_in_attribute_values() {
    assert_eq!(
        first_attributes("<a title=\"x &amp; y\">"),
        vec![Attribute::new("title", "x & y")]
    );
    assert_eq!(
        first_attributes("<a href=javascript&colon;alert(1)>"),
        vec![Attribute::new("href", "javascript:alert(1)")]
    );
    assert_eq!(
        first_attributes("<a href=\"&#106;avascript:\">"),
        vec![Attribute::new("href", "javascript:")]
    );
}

#[test]
fn test_historical_attribute_reference_rule() {
    // A legacy reference followed by '=' or an alphanumeric is left alone
    // inside attributes, so query strings survive.
    assert_eq!(
        first_attributes("<a href=\"?a=1&copy=2&not1\">"),
        vec![Attribute::new("href", "?a=1&copy=2&not1")]
    );
    assert_eq!(
        first_attributes("<a title=\"&amp\">"),
        vec![Attribute::new("title", "&")]
    );
}

#[test]
fn test_iterator_stops_after_end_of_input() {
    let mut tokenizer = tokenize("x");
    assert_eq!(tokenizer.next(), Some(Ok(Event::text("x"))));
    assert_eq!(tokenizer.next(), Some(Ok(Event::EndOfInput)));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn test_tokenizer_is_lazy() {
    let mut tokenizer = tokenize("<b>one</b><i>two</i>");
    assert_eq!(tokenizer.next(), Some(Ok(Event::open("b"))));
    assert!(tokenizer.issues().is_empty());
}

#[test]
fn test_invalid_utf8_is_a_lexical_error() {
    match tokenize_bytes(b"ok\xff") {
        Err(LexicalError::InvalidEncoding { valid_up_to }) => assert_eq!(valid_up_to, 2),
        Err(other) => panic!("Expected InvalidEncoding, got {other:?}"),
        Ok(_) => panic!("Expected InvalidEncoding, got a tokenizer"),
    }
}

#[test]
fn test_tokenize_bytes_accepts_utf8() {
    let tokenizer = tokenize_bytes("<p>é</p>".as_bytes()).expect("valid UTF-8");
    let collected: Vec<Event> = tokenizer.map(|e| e.expect("no lexical error")).collect();
    assert_eq!(collected[1], Event::text("é"));
}

#[test]
fn test_event_display() {
    let tokens = events("<a href=x/>");
    assert_eq!(tokens[0].to_string(), "OpenTag <a href=\"x/\">");
    assert_eq!(Event::close("a").to_string(), "CloseTag </a>");
    assert_eq!(Event::EndOfInput.to_string(), "EndOfInput");
}

#[test]
fn test_long_text_is_split_into_bounded_chunks() {
    let input = "<".repeat(100_000);
    let mut tokenizer = Tokenizer::new(&input);
    let mut text = String::new();
    let mut largest = 0;
    for event in tokenizer.by_ref() {
        match event.expect("tokenizing a &str never fails") {
            Event::Text(chunk) => {
                largest = largest.max(chunk.len());
                text.push_str(&chunk);
            }
            Event::EndOfInput => {}
            other => panic!("Expected only text, got {other:?}"),
        }
    }
    assert_eq!(text, input);
    assert!(largest <= Tokenizer::MAX_TEXT_CHUNK, "largest chunk was {largest}");

    // Every `<` is a parse error; only the first ones are kept.
    assert_eq!(tokenizer.issues().len(), Tokenizer::MAX_RECORDED_ISSUES);
    assert_eq!(
        tokenizer.issues().len() + tokenizer.dropped_issues(),
        input.len()
    );
}

#[test]
fn test_chunks_never_split_a_character() {
    let input = "é".repeat(Tokenizer::MAX_TEXT_CHUNK);
    let chunks: Vec<String> = events(&input)
        .into_iter()
        .filter_map(|event| match event {
            Event::Text(text) => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|chunk| chunk.len() <= Tokenizer::MAX_TEXT_CHUNK));
    assert_eq!(chunks.concat(), input);
}

#[test]
fn test_short_input_records_no_dropped_issues() {
    let mut tokenizer = Tokenizer::new("<<a>");
    for event in tokenizer.by_ref() {
        let _ = event.expect("tokenizing a &str never fails");
    }
    assert_eq!(tokenizer.issues().len(), 1);
    assert_eq!(tokenizer.dropped_issues(), 0);
}
