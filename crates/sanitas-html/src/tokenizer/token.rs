use std::fmt;

/// An attribute on a start tag.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A structural event in document order.
///
/// Derived from the token types of
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// character tokens are coalesced into [`Event::Text`], DOCTYPE tokens are not
/// produced, and attributes travel with the start tag that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A start tag with its attributes in source order.
    OpenTag {
        /// Lowercased tag name.
        name: String,
        /// Attributes, duplicates removed (the first occurrence wins).
        attributes: Vec<Attribute>,
        /// Whether the tag ended with `/>`.
        self_closing: bool,
    },
    /// Decoded character data. Character references are already resolved.
    Text(String),
    /// An end tag. Attributes on end tags are parse errors and are discarded.
    CloseTag {
        /// Lowercased tag name.
        name: String,
    },
    /// Comment data, including bogus comments such as `<?php ?>`.
    Comment(String),
    /// End of input. Always the last event.
    EndOfInput,
}

impl Event {
    /// Returns true if this is the end-of-input event.
    #[must_use]
    pub const fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    /// Convenience constructor for a start tag without attributes.
    #[must_use]
    pub fn open(name: &str) -> Self {
        Self::OpenTag {
            name: name.to_string(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    /// Convenience constructor for an end tag.
    #[must_use]
    pub fn close(name: &str) -> Self {
        Self::CloseTag {
            name: name.to_string(),
        }
    }

    /// Convenience constructor for a text event.
    #[must_use]
    pub fn text(data: &str) -> Self {
        Self::Text(data.to_string())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "OpenTag <{name}")?;
                for attr in attributes {
                    write!(f, " {}={:?}", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::Text(data) => write!(f, "Text({data:?})"),
            Self::CloseTag { name } => write!(f, "CloseTag </{name}>"),
            Self::Comment(data) => write!(f, "Comment({data:?})"),
            Self::EndOfInput => write!(f, "EndOfInput"),
        }
    }
}

/// Whether a tag token was opened by `<` or `</`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Start,
    End,
}

/// "Start and end tag tokens have a tag name, a self-closing flag, and a
/// list of attributes, each of which has a name and a value. When a start
/// or end tag token is created, its self-closing flag must be unset (its
/// other state is that it be set), and its attributes list must be empty."
#[derive(Debug, Clone)]
pub(crate) struct TagToken {
    pub(crate) kind: TagKind,
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) self_closing: bool,
    /// The last attribute duplicates an earlier one and is dropped once its
    /// value has been read.
    current_is_duplicate: bool,
}

impl TagToken {
    pub(crate) const fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            current_is_duplicate: false,
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the current input character to the current tag token's tag name."
    pub(crate) fn append_to_tag_name(&mut self, c: char) {
        self.name.push(c);
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token."
    pub(crate) fn start_new_attribute(&mut self) {
        self.discard_duplicate();
        self.attributes.push(Attribute::new(String::new(), String::new()));
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "Append the current input character to the current attribute's name."
    pub(crate) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.name.push(c);
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// "Append the current input character to the current attribute's value."
    pub(crate) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.value.push(c);
        }
    }

    /// Same as [`Self::append_to_current_attribute_value`] for a decoded
    /// character reference.
    pub(crate) fn append_str_to_current_attribute_value(&mut self, s: &str) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.value.push_str(s);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting the
    /// tag token, if appropriate), the complete attribute's name must be compared to
    /// the other attributes on the same token; if there is already an attribute on
    /// the token with the exact same name, then this is a duplicate-attribute parse
    /// error and the new attribute must be removed from the token."
    ///
    /// Returns true on a duplicate. The attribute stays in place until its value
    /// has been consumed so the value cannot leak into the previous attribute.
    pub(crate) fn finish_attribute_name(&mut self) -> bool {
        let Some((current, earlier)) = self.attributes.split_last() else {
            return false;
        };
        self.current_is_duplicate = earlier.iter().any(|attr| attr.name == current.name);
        self.current_is_duplicate
    }

    fn discard_duplicate(&mut self) {
        if self.current_is_duplicate {
            let _ = self.attributes.pop();
            self.current_is_duplicate = false;
        }
    }

    /// Turn the finished token into an event.
    pub(crate) fn into_event(mut self) -> Event {
        self.discard_duplicate();
        match self.kind {
            TagKind::Start => Event::OpenTag {
                name: self.name,
                attributes: self.attributes,
                self_closing: self.self_closing,
            },
            TagKind::End => Event::CloseTag { name: self.name },
        }
    }
}
