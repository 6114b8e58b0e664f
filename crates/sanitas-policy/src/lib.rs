//! Sanitization policies for the sanitas sanitizer.
//!
//! A policy answers one question for every start tag: may this element be
//! emitted, and with which attributes? The answer is a [`Decision`]:
//!
//! - [`Decision::Allow`] with the output name and the attributes that passed
//!   their validators
//! - [`Decision::Reject`] with a [`Disposition`] saying whether the element's
//!   content goes with it
//!
//! Policies are built with [`PolicyBuilder`] or loaded from JSON
//! ([`PolicyDefinition`]), and are immutable afterwards.

/// Fluent policy construction.
pub mod builder;
/// Policy construction errors.
pub mod error;
/// Policy types and evaluation.
pub mod policy;
/// Ready-made policies.
pub mod presets;
/// Attribute value validators.
pub mod validator;

pub use builder::{AttributeRuleBuilder, PolicyBuilder};
pub use error::PolicyError;
pub use policy::{Decision, Disposition, ElementRule, Policy, PolicyDefinition};
pub use validator::AttributeValidator;
