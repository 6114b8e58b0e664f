//! Policy definitions and evaluation.
//!
//! A [`Policy`] is immutable once built. [`Policy::evaluate`] takes `&self`
//! and touches no shared state, so one policy can serve any number of
//! concurrent sanitizer runs through an `Arc<Policy>`.

use std::collections::{BTreeMap, HashSet};

use sanitas_common::names::{
    is_event_handler_attribute, is_valid_attribute_name, is_valid_element_name,
};
use sanitas_common::url::is_valid_scheme;
use sanitas_html::Attribute;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::builder::PolicyBuilder;
use crate::error::PolicyError;
use crate::validator::AttributeValidator;

/// Elements whose content is dropped with them unless a rule says otherwise.
/// Their text is script, style, form state or foreign markup, none of which
/// reads as prose once the tags are gone.
const DROP_CONTENT_ELEMENTS: &[&str] = &[
    "applet", "embed", "frame", "frameset", "iframe", "math", "noembed", "noframes", "noscript",
    "object", "plaintext", "script", "select", "style", "svg", "template", "textarea", "title",
    "xmp",
];

/// Elements a policy may not allow, because nothing after their start tag is
/// ever parsed as markup again.
const UNSUPPORTED_ELEMENTS: &[&str] = &["plaintext"];

/// What happens to an element the policy does not allow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Disposition {
    /// Drop the element and everything inside it.
    DropElementAndContent,
    /// Drop the start and end tags but keep the text inside.
    #[default]
    DropTagKeepText,
}

/// The rule for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementRule {
    /// Whether the element may appear in the output.
    pub allowed: bool,
    /// Attributes allowed on this element, checked before the global ones.
    pub attributes: BTreeMap<String, AttributeValidator>,
    /// What to do when the element is not allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,
    /// Name to emit instead of the input name, e.g. `font` as `span`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_to: Option<String>,
}

/// The serializable form of a policy.
///
/// ```json
/// {
///   "elements": {
///     "a": { "allowed": true, "attributes": { "href": { "kind": "url", "schemes": ["https"] } } },
///     "script": { "disposition": "drop_element_and_content" }
///   },
///   "global_attributes": { "title": { "kind": "text", "max_len": 200 } },
///   "default_disposition": "drop_tag_keep_text"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDefinition {
    /// Rules by lowercase element name.
    pub elements: BTreeMap<String, ElementRule>,
    /// Attributes allowed on every allowed element.
    pub global_attributes: BTreeMap<String, AttributeValidator>,
    /// Disposition for elements with no rule outside the drop-content set.
    pub default_disposition: Disposition,
}

/// The outcome of evaluating one start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Emit the element.
    Allow {
        /// Output element name (after any rename).
        name: String,
        /// The attributes that passed validation, in input order.
        attributes: Vec<Attribute>,
    },
    /// Drop the element as described.
    Reject(Disposition),
}

/// An immutable sanitization policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    definition: PolicyDefinition,
}

impl Policy {
    /// Start building a policy.
    #[must_use]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// Validate a definition and build a policy from it.
    ///
    /// Names and URL schemes are lowercased. When two entries differ only in
    /// case the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if a name or scheme is invalid, if an `on*`
    /// attribute or an unsupported element is allowed, or if an integer
    /// validator has an empty range.
    pub fn from_definition(definition: PolicyDefinition) -> Result<Self, PolicyError> {
        let definition = normalize(definition);

        for (element, rule) in &definition.elements {
            check_element_name(element)?;
            if rule.allowed && UNSUPPORTED_ELEMENTS.contains(&element.as_str()) {
                return Err(PolicyError::UnsupportedElement(element.clone()));
            }
            if let Some(target) = &rule.rename_to {
                check_element_name(target)?;
                if UNSUPPORTED_ELEMENTS.contains(&target.as_str()) {
                    return Err(PolicyError::UnsupportedElement(target.clone()));
                }
            }
            for (attribute, validator) in &rule.attributes {
                check_attribute(attribute, validator)?;
            }
        }
        for (attribute, validator) in &definition.global_attributes {
            check_attribute(attribute, validator)?;
        }

        Ok(Self { definition })
    }

    /// Build a policy without checking it. Only for definitions that are
    /// known to be valid, such as the presets.
    pub(crate) fn from_trusted_definition(definition: PolicyDefinition) -> Self {
        Self {
            definition: normalize(definition),
        }
    }

    /// Read a policy from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Json`] for malformed JSON and any error of
    /// [`Policy::from_definition`].
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let definition: PolicyDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    /// Write the policy as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string_pretty(&self.definition)?)
    }

    /// The normalized definition this policy was built from.
    #[must_use]
    pub const fn definition(&self) -> &PolicyDefinition {
        &self.definition
    }

    /// Returns true if `element` may appear in the output.
    #[must_use]
    pub fn allows_element(&self, element: &str) -> bool {
        self.rule(element).is_some_and(|rule| rule.allowed)
    }

    /// What happens to `element` when it is rejected.
    ///
    /// An explicit rule wins. Otherwise elements in the drop-content set lose
    /// their content and everything else gets the default disposition.
    #[must_use]
    pub fn disposition_for(&self, element: &str) -> Disposition {
        if let Some(disposition) = self.rule(element).and_then(|rule| rule.disposition) {
            return disposition;
        }
        if DROP_CONTENT_ELEMENTS.contains(&element.to_ascii_lowercase().as_str()) {
            Disposition::DropElementAndContent
        } else {
            self.definition.default_disposition
        }
    }

    /// Decide what to do with a start tag.
    ///
    /// Attributes are kept if a rule for the element, or failing that a
    /// global rule, names them and their validator accepts the value.
    /// Event handler attributes and repeated attributes are always removed.
    #[must_use]
    pub fn evaluate(&self, element: &str, attributes: &[Attribute]) -> Decision {
        let Some(rule) = self.rule(element).filter(|rule| rule.allowed) else {
            return Decision::Reject(self.disposition_for(element));
        };

        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let name = attribute.name.to_ascii_lowercase();
            // The first occurrence decides, as it does in the tokenizer.
            if is_event_handler_attribute(&name) || !seen.insert(name.clone()) {
                continue;
            }
            let validator = rule
                .attributes
                .get(&name)
                .or_else(|| self.definition.global_attributes.get(&name));
            if let Some(value) = validator.and_then(|v| v.validate(&attribute.value)) {
                kept.push(Attribute { name, value });
            }
        }

        let name = rule
            .rename_to
            .clone()
            .unwrap_or_else(|| element.to_ascii_lowercase());
        Decision::Allow {
            name,
            attributes: kept,
        }
    }

    fn rule(&self, element: &str) -> Option<&ElementRule> {
        match self.definition.elements.get(element) {
            Some(rule) => Some(rule),
            None if element.bytes().any(|b| b.is_ascii_uppercase()) => {
                self.definition.elements.get(&element.to_ascii_lowercase())
            }
            None => None,
        }
    }
}

fn check_element_name(name: &str) -> Result<(), PolicyError> {
    if is_valid_element_name(name) {
        Ok(())
    } else {
        Err(PolicyError::InvalidElementName(name.to_string()))
    }
}

fn check_attribute(name: &str, validator: &AttributeValidator) -> Result<(), PolicyError> {
    if !is_valid_attribute_name(name) {
        return Err(PolicyError::InvalidAttributeName(name.to_string()));
    }
    if is_event_handler_attribute(name) {
        return Err(PolicyError::EventHandlerAttribute(name.to_string()));
    }
    match validator {
        AttributeValidator::Url { schemes, .. } => {
            if let Some(bad) = schemes.iter().find(|s| !is_valid_scheme(s)) {
                return Err(PolicyError::InvalidScheme(bad.clone()));
            }
        }
        AttributeValidator::Integer { min, max } if min > max => {
            return Err(PolicyError::InvalidValidator {
                attribute: name.to_string(),
                reason: format!("empty range {min}..={max}"),
            });
        }
        AttributeValidator::OneOf { values } if values.is_empty() => {
            return Err(PolicyError::InvalidValidator {
                attribute: name.to_string(),
                reason: "no values listed".to_string(),
            });
        }
        _ => {}
    }
    Ok(())
}

fn normalize(definition: PolicyDefinition) -> PolicyDefinition {
    let elements = definition
        .elements
        .into_iter()
        .map(|(name, rule)| {
            let rule = ElementRule {
                attributes: normalize_attributes(rule.attributes),
                rename_to: rule.rename_to.map(|to| to.to_ascii_lowercase()),
                ..rule
            };
            (name.to_ascii_lowercase(), rule)
        })
        .collect();
    PolicyDefinition {
        elements,
        global_attributes: normalize_attributes(definition.global_attributes),
        default_disposition: definition.default_disposition,
    }
}

fn normalize_attributes(
    attributes: BTreeMap<String, AttributeValidator>,
) -> BTreeMap<String, AttributeValidator> {
    attributes
        .into_iter()
        .map(|(name, validator)| {
            let validator = match validator {
                AttributeValidator::Url {
                    schemes,
                    allow_relative,
                } => AttributeValidator::Url {
                    schemes: schemes.iter().map(|s| s.to_ascii_lowercase()).collect(),
                    allow_relative,
                },
                other => other,
            };
            (name.to_ascii_lowercase(), validator)
        })
        .collect()
}
