//! # Bus configuration.
//!
//! Provides [`BusConfig`] settings for an [`EventBus`](crate::EventBus) instance.
//!
//! ## Example
//! ```rust
//! use evbus::{BusConfig, EventBus};
//!
//! let bus = EventBus::with_config(BusConfig::default().with_label("billing"));
//! assert_eq!(bus.config().label(), "billing");
//! ```

use std::borrow::Cow;

/// Label used by [`BusConfig::default`].
pub const DEFAULT_LABEL: &str = "evbus";

/// Configuration for one bus instance.
///
/// ## Field semantics
/// - `label`: attached as the `bus` field to every log record the instance emits,
///   so that several independent buses can be told apart in one log stream.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Name of this bus in logs.
    pub label: Cow<'static, str>,
}

impl BusConfig {
    /// Returns a copy with the given label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the label, falling back to [`DEFAULT_LABEL`] when empty.
    #[inline]
    pub fn label(&self) -> &str {
        if self.label.is_empty() {
            DEFAULT_LABEL
        } else {
            &self.label
        }
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `label = "evbus"`
    fn default() -> Self {
        Self {
            label: Cow::Borrowed(DEFAULT_LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_falls_back() {
        let cfg = BusConfig::default().with_label("");
        assert_eq!(cfg.label(), DEFAULT_LABEL);
    }

    #[test]
    fn test_custom_label() {
        let cfg = BusConfig::default().with_label(String::from("orders"));
        assert_eq!(cfg.label(), "orders");
    }
}
