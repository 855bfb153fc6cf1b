//! # Subscription handle.
//!
//! A [`Subscription`] is returned by [`EventBus::subscribe`](crate::EventBus::subscribe)
//! and represents one (name, handler) registration.
//!
//! ## Rules
//! - `cancel()` removes exactly that pair from the registry and is idempotent.
//! - Cancelling does not touch dispatches that already took their snapshot: an
//!   invocation scheduled by `publish` before the cancel still runs to completion.
//! - Dropping a subscription does **not** cancel it.
//! - The handle holds the registry weakly; cancelling after the bus is gone is a no-op.
//! - Handlers form a set per name: if the same handler was subscribed twice under
//!   one name, cancelling either handle unsubscribes it.

use std::fmt;
use std::sync::Weak;

use crate::core::registry::Registry;
use crate::events::{EventName, EventType};
use crate::handlers::HandlerRef;

/// Cancellable handle for one registration.
pub struct Subscription {
    event_name: EventName,
    event_type: Option<EventType>,
    handler: HandlerRef,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(
        event_name: EventName,
        event_type: Option<EventType>,
        handler: HandlerRef,
        registry: Weak<Registry>,
    ) -> Self {
        Self {
            event_name,
            event_type,
            handler,
            registry,
        }
    }

    /// Name the handler is registered under.
    #[inline]
    pub fn event_name(&self) -> &EventName {
        &self.event_name
    }

    /// Resolved event type, if one was given or declared.
    #[inline]
    pub fn event_type(&self) -> Option<&EventType> {
        self.event_type.as_ref()
    }

    /// The registered handler.
    #[inline]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// Unsubscribes the handler from its name. Safe to call any number of times.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.event_name.as_str(), &self.handler);
        }
    }

    /// True while the handler is still in the set for its name.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.event_name.as_str(), &self.handler))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.event_name)
            .field("type", &self.event_type)
            .field("handler", &self.handler.name())
            .finish()
    }
}
