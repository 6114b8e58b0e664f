use std::collections::BTreeMap;

use serde_json::Value;

use super::{EscapedFormatter, MarkupFormatter, RawHtmlFormatter};
use crate::error::ConfigError;

/// Builds a formatter from its JSON options.
pub type FormatterFactory = fn(&Value) -> Result<Box<dyn MarkupFormatter>, ConfigError>;

/// Formatters by name.
///
/// Registration is explicit: a host builds one registry at startup, adds its
/// own formatters and hands it around. There is no global list.
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    factories: BTreeMap<String, FormatterFactory>,
}

impl FormatterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with `raw-html` and `escaped`.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let _ = registry.register(RawHtmlFormatter::NAME, |options| {
            Ok(Box::new(RawHtmlFormatter::from_options(options)?))
        });
        let _ = registry.register(EscapedFormatter::NAME, |_| Ok(Box::new(EscapedFormatter)));
        registry
    }

    /// Register `factory` under `name`, returning the factory it replaces.
    pub fn register(
        &mut self,
        name: &str,
        factory: FormatterFactory,
    ) -> Option<FormatterFactory> {
        self.factories.insert(name.to_string(), factory)
    }

    /// Build the formatter registered under `name`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownFormatter`] if nothing is registered under
    /// `name`, otherwise whatever the factory reports.
    pub fn create(
        &self,
        name: &str,
        options: &Value,
    ) -> Result<Box<dyn MarkupFormatter>, ConfigError> {
        let Some(factory) = self.factories.get(name) else {
            return Err(ConfigError::UnknownFormatter {
                name: name.to_string(),
                registered: self.names().collect::<Vec<_>>().join(", "),
            });
        };
        factory(options)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
