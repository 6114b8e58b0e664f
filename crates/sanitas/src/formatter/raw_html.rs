use std::io::Write;
use std::sync::{Arc, LazyLock};

use sanitas_policy::presets::shared_rich_text;
use sanitas_policy::{Policy, PolicyDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MarkupFormatter;
use crate::error::{ConfigError, TranslateError};
use crate::translate::{Limits, translate_with_limits};

static DEFAULT_INSTANCE: LazyLock<RawHtmlFormatter> =
    LazyLock::new(|| RawHtmlFormatter::new(RawHtmlConfig::default()));

/// Settings a site administrator can change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHtmlConfig {
    /// Show a plain textarea instead of a highlighting editor.
    pub disable_syntax_highlighting: bool,
}

/// The JSON options accepted by [`RawHtmlFormatter::from_options`].
///
/// ```json
/// { "disable_syntax_highlighting": true, "limits": { "max_input_bytes": 65536 } }
/// ```
///
/// A `policy` replaces the built-in rich text policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHtmlOptions {
    /// Editor settings.
    #[serde(flatten)]
    pub config: RawHtmlConfig,
    /// Custom policy rules.
    pub policy: Option<PolicyDefinition>,
    /// Resource limits.
    pub limits: Limits,
}

/// HTML written by users, filtered through a [`Policy`].
#[derive(Debug, Clone)]
pub struct RawHtmlFormatter {
    policy: Arc<Policy>,
    limits: Limits,
    config: RawHtmlConfig,
}

impl RawHtmlFormatter {
    /// Registry name.
    pub const NAME: &'static str = "raw-html";

    /// A formatter using the shared rich text policy.
    #[must_use]
    pub fn new(config: RawHtmlConfig) -> Self {
        Self {
            policy: shared_rich_text(),
            limits: Limits::default(),
            config,
        }
    }

    /// Replace the policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<Policy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The process-wide instance with default settings.
    #[must_use]
    pub fn default_instance() -> &'static Self {
        &DEFAULT_INSTANCE
    }

    /// The policy in effect.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Editor settings.
    #[must_use]
    pub const fn config(&self) -> RawHtmlConfig {
        self.config
    }

    /// Resource limits.
    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// Build from JSON options. `null` gives the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for options of the wrong shape and
    /// [`ConfigError::Policy`] for an invalid embedded policy.
    pub fn from_options(options: &Value) -> Result<Self, ConfigError> {
        if options.is_null() {
            return Ok(Self::new(RawHtmlConfig::default()));
        }
        let options = RawHtmlOptions::deserialize(options)?;
        let mut formatter = Self::new(options.config).with_limits(options.limits);
        if let Some(definition) = options.policy {
            formatter = formatter.with_policy(Arc::new(Policy::from_definition(definition)?));
        }
        Ok(formatter)
    }
}

impl Default for RawHtmlFormatter {
    fn default() -> Self {
        Self::new(RawHtmlConfig::default())
    }
}

impl MarkupFormatter for RawHtmlFormatter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Safe HTML"
    }

    fn translate(&self, markup: &str, sink: &mut dyn Write) -> Result<(), TranslateError> {
        translate_with_limits(markup, sink, &self.policy, self.limits)
    }

    fn code_mirror_mode(&self) -> Option<&'static str> {
        if self.config.disable_syntax_highlighting {
            None
        } else {
            Some("htmlmixed")
        }
    }

    fn code_mirror_config(&self) -> Option<&'static str> {
        Some("mode:'text/html'")
    }
}
