//! # Event name resolution.
//!
//! A [`Route`] carries the optional explicit type and name a caller passes to
//! `publish`/`subscribe`, and turns them into the one [`EventName`] the
//! registry routes on.
//!
//! ## Resolution order
//! ```text
//! publish:    explicit name ─► explicit type ─► runtime type of the payload
//! subscribe:  explicit name ─► explicit type ─► type declared by the handler
//!                                                   └─► none: ConfigurationError
//! ```
//!
//! Publishing always resolves. Subscribing can fail; when it does, nothing is registered.
//!
//! ## Example
//! ```rust
//! use evbus::{EventType, Route};
//!
//! struct Signup;
//!
//! let route = Route::typed::<Signup>();
//! assert_eq!(route.resolve_publish(&EventType::of::<u8>()).as_str(), "Signup");
//!
//! let route = Route::named("user.signup").with_type::<Signup>();
//! assert_eq!(route.resolve_publish(&EventType::of::<u8>()).as_str(), "user.signup");
//! ```

use std::any::Any;

use crate::error::ConfigurationError;

use super::name::{EventName, EventType};

/// Optional explicit type and name for one publish or subscribe call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    /// Explicit type; its short name is used when no name is given.
    pub event_type: Option<EventType>,
    /// Explicit name; always wins.
    pub event_name: Option<EventName>,
}

impl Route {
    /// Empty route: everything is inferred.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route with an explicit name.
    pub fn named(name: impl Into<EventName>) -> Self {
        Self::new().with_name(name)
    }

    /// Route with an explicit type.
    pub fn typed<T: Any + ?Sized>() -> Self {
        Self::new().with_type::<T>()
    }

    /// Sets the explicit name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<EventName>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    /// Sets the explicit type.
    #[must_use]
    pub fn with_type<T: Any + ?Sized>(mut self) -> Self {
        self.event_type = Some(EventType::of::<T>());
        self
    }

    /// Sets the explicit type from an existing descriptor.
    #[must_use]
    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Resolves the name for a publish call; `runtime` is the payload's own type.
    pub fn resolve_publish(&self, runtime: &EventType) -> EventName {
        if let Some(name) = &self.event_name {
            return name.clone();
        }
        self.event_type
            .as_ref()
            .unwrap_or(runtime)
            .name()
            .clone()
    }

    /// Resolves the name and type for a subscribe call.
    ///
    /// `declared` is the event type the handler declares, if any; `handler` is
    /// only used to describe the rejected handler in the error.
    ///
    /// The returned type is the explicit type, else the declared one.
    pub fn resolve_subscribe(
        &self,
        declared: Option<EventType>,
        handler: &str,
    ) -> Result<(EventName, Option<EventType>), ConfigurationError> {
        let event_type = self.event_type.clone().or(declared);
        let name = match (&self.event_name, &event_type) {
            (Some(name), _) => name.clone(),
            (None, Some(ty)) => ty.name().clone(),
            (None, None) => {
                return Err(ConfigurationError::Unresolvable {
                    handler: handler.to_string(),
                });
            }
        };
        Ok((name, event_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base;
    struct Derived;

    #[test]
    fn test_publish_prefers_explicit_name() {
        let route = Route::named("custom").with_type::<Base>();
        assert_eq!(route.resolve_publish(&EventType::of::<Derived>()).as_str(), "custom");
    }

    #[test]
    fn test_publish_falls_back_to_explicit_type() {
        let route = Route::typed::<Base>();
        assert_eq!(route.resolve_publish(&EventType::of::<Derived>()).as_str(), "Base");
    }

    #[test]
    fn test_publish_falls_back_to_runtime_type() {
        let route = Route::new();
        assert_eq!(route.resolve_publish(&EventType::of::<Derived>()).as_str(), "Derived");
    }

    #[test]
    fn test_subscribe_uses_declared_type() {
        let (name, ty) = Route::new()
            .resolve_subscribe(Some(EventType::of::<Derived>()), "h")
            .unwrap();
        assert_eq!(name.as_str(), "Derived");
        assert_eq!(ty, Some(EventType::of::<Derived>()));
    }

    #[test]
    fn test_subscribe_explicit_type_overrides_declared() {
        let (name, ty) = Route::typed::<Base>()
            .resolve_subscribe(Some(EventType::of::<Derived>()), "h")
            .unwrap();
        assert_eq!(name.as_str(), "Base");
        assert_eq!(ty, Some(EventType::of::<Base>()));
    }

    #[test]
    fn test_subscribe_name_without_type() {
        let (name, ty) = Route::named("DictEvent").resolve_subscribe(None, "h").unwrap();
        assert_eq!(name.as_str(), "DictEvent");
        assert_eq!(ty, None);
    }

    #[test]
    fn test_subscribe_unresolvable() {
        let err = Route::new().resolve_subscribe(None, "audit").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Unresolvable {
                handler: "audit".into()
            }
        );
    }
}
