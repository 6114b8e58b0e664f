//! Errors raised while building or loading a policy.

use thiserror::Error;

/// A policy definition that cannot be turned into a [`crate::Policy`].
#[derive(Debug, Error)]
pub enum PolicyError {
    /// An element name that is not `[a-z][a-z0-9-]*`.
    #[error("invalid element name {0:?}")]
    InvalidElementName(String),
    /// An attribute name that is not `[a-z][a-z0-9_:-]*`.
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
    /// An `on*` attribute. These carry script and are never allowed.
    #[error("event handler attribute {0:?} can never be allowed")]
    EventHandlerAttribute(String),
    /// A URL scheme that is not `[a-z][a-z0-9+.-]*`.
    #[error("invalid URL scheme {0:?}")]
    InvalidScheme(String),
    /// An element whose content can never be closed, such as `plaintext`.
    #[error("<{0}> cannot be allowed: nothing can follow its content")]
    UnsupportedElement(String),
    /// A validator that can never accept a value.
    #[error("validator for attribute {attribute:?} accepts nothing: {reason}")]
    InvalidValidator {
        /// The attribute the validator belongs to.
        attribute: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The JSON form of a policy could not be read or written.
    #[error("invalid policy definition: {0}")]
    Json(#[from] serde_json::Error),
}
