//! Error types used by the bus and by event handlers.
//!
//! This module defines two main error enums:
//!
//! - [`ConfigurationError`] - returned to the caller of `subscribe` when no event name can be resolved.
//! - [`HandlerError`] - raised by individual handler invocations; caught and logged at the dispatch boundary.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors returned when registering a handler.
///
/// The only caller-visible failure of the bus. Nothing is registered when it is returned.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No explicit name, no explicit type, and the handler declares no event type.
    #[error(
        "handler '{handler}' does not declare an event type and no event name or type was given"
    )]
    Unresolvable {
        /// Name of the rejected handler.
        handler: String,
    },
}

impl ConfigurationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evbus::ConfigurationError;
    ///
    /// let err = ConfigurationError::Unresolvable { handler: "audit".into() };
    /// assert_eq!(err.as_label(), "config_unresolvable_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigurationError::Unresolvable { .. } => "config_unresolvable_name",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConfigurationError::Unresolvable { handler } => {
                format!("unresolvable event name for handler={handler}")
            }
        }
    }
}

/// # Errors produced by handler invocations.
///
/// Never propagated to publishers or sibling handlers. The dispatcher logs them
/// together with the offending event and moves on.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Handler reported a failure.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Payload routed to a typed handler has a different runtime type.
    #[error("event type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the handler declared.
        expected: &'static str,
        /// Runtime type of the published payload.
        found: &'static str,
    },

    /// Handler panicked; the panic was caught at the dispatch boundary.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Fail`].
    ///
    /// # Example
    /// ```
    /// use evbus::HandlerError;
    ///
    /// let err = HandlerError::fail("connection refused");
    /// assert_eq!(err.to_string(), "handler failed: connection refused");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::TypeMismatch { .. } => "handler_type_mismatch",
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::TypeMismatch { expected, found } => {
                format!("type mismatch: expected={expected} found={found}")
            }
            HandlerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(HandlerError::fail("x").as_label(), "handler_failed");
        assert_eq!(
            HandlerError::Panicked { info: "boom".into() }.as_label(),
            "handler_panicked"
        );
        assert_eq!(
            HandlerError::TypeMismatch {
                expected: "A",
                found: "B"
            }
            .as_label(),
            "handler_type_mismatch"
        );
    }

    #[test]
    fn test_configuration_error_mentions_handler() {
        let err = ConfigurationError::Unresolvable {
            handler: "audit".into(),
        };
        assert!(err.to_string().contains("audit"));
        assert_eq!(err.as_message(), "unresolvable event name for handler=audit");
    }
}
