//! Fluent construction of policies.
//!
//! ```ignore
//! let policy = Policy::builder()
//!     .allow_elements(["p", "b", "a"])
//!     .allow_url_attributes(["href"])
//!     .on_elements(["a"])
//!     .allow_attributes(["title"])
//!     .matching(AttributeValidator::text(200))
//!     .globally()
//!     .build()?;
//! ```

use crate::error::PolicyError;
use crate::policy::{Disposition, Policy, PolicyDefinition};
use crate::validator::{AttributeValidator, DEFAULT_URL_SCHEMES};

/// Builds a [`Policy`] one rule at a time.
///
/// Nothing is checked until [`PolicyBuilder::build`].
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    definition: PolicyDefinition,
    url_schemes: Vec<String>,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    /// An empty policy: nothing is allowed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: PolicyDefinition::default(),
            url_schemes: DEFAULT_URL_SCHEMES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Allow the given elements.
    #[must_use]
    pub fn allow_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for element in elements {
            self.definition
                .elements
                .entry(element.as_ref().to_string())
                .or_default()
                .allowed = true;
        }
        self
    }

    /// Allow the given attributes with any value. Narrow the value with
    /// [`AttributeRuleBuilder::matching`], then say where they apply.
    #[must_use]
    pub fn allow_attributes<I, S>(self, attributes: I) -> AttributeRuleBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AttributeRuleBuilder {
            builder: self,
            attributes: attributes.into_iter().map(|a| a.as_ref().to_string()).collect(),
            validator: AttributeValidator::Any,
        }
    }

    /// Allow the given URL-valued attributes, restricted to the schemes set
    /// by [`PolicyBuilder::allow_url_schemes`] plus relative URLs.
    #[must_use]
    pub fn allow_url_attributes<I, S>(self, attributes: I) -> AttributeRuleBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let validator = AttributeValidator::Url {
            schemes: self.url_schemes.clone(),
            allow_relative: true,
        };
        self.allow_attributes(attributes).matching(validator)
    }

    /// Set the schemes used by later [`PolicyBuilder::allow_url_attributes`]
    /// calls. Defaults to `http`, `https` and `mailto`.
    #[must_use]
    pub fn allow_url_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.url_schemes = schemes
            .into_iter()
            .map(|s| s.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Set what happens to `element` when it is not allowed.
    #[must_use]
    pub fn disposition(mut self, element: &str, disposition: Disposition) -> Self {
        self.definition
            .elements
            .entry(element.to_string())
            .or_default()
            .disposition = Some(disposition);
        self
    }

    /// Allow `from` and emit it as `to`.
    #[must_use]
    pub fn rename_element(mut self, from: &str, to: &str) -> Self {
        let rule = self.definition.elements.entry(from.to_string()).or_default();
        rule.allowed = true;
        rule.rename_to = Some(to.to_string());
        self
    }

    /// Set the disposition for elements with no rule of their own.
    #[must_use]
    pub fn default_disposition(mut self, disposition: Disposition) -> Self {
        self.definition.default_disposition = disposition;
        self
    }

    /// Validate the rules and build the policy.
    ///
    /// # Errors
    ///
    /// See [`Policy::from_definition`].
    pub fn build(self) -> Result<Policy, PolicyError> {
        Policy::from_definition(self.definition)
    }

    /// Build without validation, for rules written in this crate.
    pub(crate) fn build_trusted(self) -> Policy {
        Policy::from_trusted_definition(self.definition)
    }
}

/// Second half of an attribute rule: which value is accepted and where.
#[derive(Debug, Clone)]
#[must_use = "an attribute rule does nothing until on_elements or globally is called"]
pub struct AttributeRuleBuilder {
    builder: PolicyBuilder,
    attributes: Vec<String>,
    validator: AttributeValidator,
}

impl AttributeRuleBuilder {
    /// Only accept values the validator accepts.
    pub fn matching(mut self, validator: AttributeValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Allow the attributes on the given elements.
    #[must_use]
    pub fn on_elements<I, S>(self, elements: I) -> PolicyBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Self {
            mut builder,
            attributes,
            validator,
        } = self;
        for element in elements {
            let rule = builder
                .definition
                .elements
                .entry(element.as_ref().to_string())
                .or_default();
            for attribute in &attributes {
                let _ = rule.attributes.insert(attribute.clone(), validator.clone());
            }
        }
        builder
    }

    /// Allow the attributes on every allowed element.
    #[must_use]
    pub fn globally(self) -> PolicyBuilder {
        let Self {
            mut builder,
            attributes,
            validator,
        } = self;
        for attribute in attributes {
            let _ = builder
                .definition
                .global_attributes
                .insert(attribute, validator.clone());
        }
        builder
    }
}
