//! # Handler abstraction.
//!
//! This module defines the [`Handler`] trait (async, single event argument). The
//! common handle type is [`HandlerRef`], an `Arc<dyn Handler>` suitable for
//! sharing between the registry, subscriptions and dispatch tasks.
//!
//! ## Identity
//! The registry keeps handlers as a set per event name. Two `HandlerRef`s are the
//! same handler when they point to the same allocation; registering a clone of
//! an already registered `Arc` under the same name is a no-op.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{Event, EventType};

/// Shared handle to a handler.
pub type HandlerRef = Arc<dyn Handler>;

/// # Receiver of published events.
///
/// Called from a dedicated tokio task under `publish`, or inline in the
/// caller's task under `sync_publish`. Implementations may suspend (I/O, timers)
/// but should not block the thread.
///
/// Errors and panics are caught by the bus, logged together with the event and
/// suppressed; they never reach the publisher or other handlers.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use evbus::{Event, EventType, Handler, HandlerError};
///
/// #[derive(Debug)]
/// struct Deposit { cents: u64 }
///
/// struct Ledger;
///
/// #[async_trait]
/// impl Handler for Ledger {
///     async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
///         let deposit = event
///             .downcast_ref::<Deposit>()
///             .ok_or_else(|| HandlerError::fail("not a deposit"))?;
///         let _ = deposit.cents;
///         Ok(())
///     }
///
///     fn event_type(&self) -> Option<EventType> {
///         Some(EventType::of::<Deposit>())
///     }
///
///     fn name(&self) -> &str { "ledger" }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Processes a single event.
    async fn handle(&self, event: &Event) -> Result<(), HandlerError>;

    /// Event type this handler accepts, if it declares one.
    ///
    /// Used to resolve the event name when `subscribe` is given neither a name
    /// nor a type. The default declares nothing.
    fn event_type(&self) -> Option<EventType> {
        None
    }

    /// Returns the handler name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Address of the allocation behind a handler; the identity used for set semantics.
#[inline]
pub(crate) fn handler_key(handler: &HandlerRef) -> usize {
    Arc::as_ptr(handler) as *const () as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait]
    impl Handler for Noop {
        async fn handle(&self, _event: &Event) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    #[test]
    fn test_identity_follows_allocation() {
        let a: HandlerRef = Arc::new(Noop);
        let b: HandlerRef = Arc::new(Noop);
        assert_eq!(handler_key(&a), handler_key(&Arc::clone(&a)));
        assert_ne!(handler_key(&a), handler_key(&b));
    }

    #[test]
    fn test_defaults() {
        let h = Noop;
        assert!(h.event_type().is_none());
        assert!(h.name().ends_with("Noop"));
    }
}
