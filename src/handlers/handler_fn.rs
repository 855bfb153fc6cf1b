//! # Function-backed handlers (`HandlerFn`, `EventFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(Arc<E>) -> Fut` and declares `E` as its
//! event type, so it can be subscribed without an explicit name or type.
//! [`EventFn`] wraps a closure over the raw [`Event`] envelope and declares
//! nothing; subscribing it needs an explicit name or type.
//!
//! Each invocation creates a fresh future. If handlers need shared state, capture
//! an `Arc<...>` in the closure explicitly.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use evbus::{EventFn, Handler, HandlerError, HandlerFn, HandlerRef};
//!
//! #[derive(Debug)]
//! struct Shipped { order: u64 }
//!
//! let typed: HandlerRef = HandlerFn::arc("notify", |ev: Arc<Shipped>| async move {
//!     let _ = ev.order;
//!     Ok::<_, HandlerError>(())
//! });
//! assert_eq!(typed.name(), "notify");
//! assert_eq!(typed.event_type().map(|t| t.name().to_string()).as_deref(), Some("Shipped"));
//!
//! let raw: HandlerRef = EventFn::arc("audit", |ev: evbus::Event| async move {
//!     let _ = ev.repr();
//!     Ok(())
//! });
//! assert!(raw.event_type().is_none());
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{Event, EventType};
use crate::handlers::handler::Handler;

/// Typed function-backed handler.
pub struct HandlerFn<E, F> {
    name: Cow<'static, str>,
    f: F,
    _event: PhantomData<fn(Arc<E>)>,
}

impl<E, F> HandlerFn<E, F>
where
    E: Any + Send + Sync,
{
    /// Creates a new typed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`](crate::HandlerRef).
    pub fn new<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Arc<E>) -> Fut,
        Fut: Future<Output = Result<(), HandlerError>>,
    {
        Self {
            name: name.into(),
            f,
            _event: PhantomData,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(Arc<E>) -> Fut,
        Fut: Future<Output = Result<(), HandlerError>>,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<E, F> fmt::Debug for HandlerFn<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn")
            .field("name", &self.name)
            .field("event", &std::any::type_name::<E>())
            .finish()
    }
}

#[async_trait]
impl<E, F, Fut> Handler for HandlerFn<E, F>
where
    E: Any + Send + Sync,
    F: Fn(Arc<E>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        let payload = event
            .downcast::<E>()
            .ok_or_else(|| HandlerError::TypeMismatch {
                expected: std::any::type_name::<E>(),
                found: event.event_type().type_name(),
            })?;
        (self.f)(payload).await
    }

    fn event_type(&self) -> Option<EventType> {
        Some(EventType::of::<E>())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Untyped function-backed handler over the raw [`Event`].
pub struct EventFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> EventFn<F> {
    /// Creates a new untyped handler.
    pub fn new<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Event) -> Fut,
        Fut: Future<Output = Result<(), HandlerError>>,
    {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(Event) -> Fut,
        Fut: Future<Output = Result<(), HandlerError>>,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<F> fmt::Debug for EventFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFn").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> Handler for EventFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        (self.f)(event.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Debug)]
    struct Credit(u64);

    #[tokio::test]
    async fn test_typed_handler_receives_payload() {
        let total = Arc::new(AtomicU64::new(0));
        let t = Arc::clone(&total);
        let h = HandlerFn::arc("credit", move |ev: Arc<Credit>| {
            let t = Arc::clone(&t);
            async move {
                t.fetch_add(ev.0, Ordering::SeqCst);
                Ok(())
            }
        });

        h.handle(&Event::new("Credit", Credit(5))).await.unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 5);
        assert_eq!(h.event_type(), Some(EventType::of::<Credit>()));
    }

    #[tokio::test]
    async fn test_typed_handler_rejects_other_payload() {
        let h = HandlerFn::arc("credit", |_ev: Arc<Credit>| async { Ok(()) });
        let err = h.handle(&Event::new("Credit", "text")).await.unwrap_err();
        assert_eq!(err.as_label(), "handler_type_mismatch");
    }

    #[tokio::test]
    async fn test_event_fn_sees_envelope() {
        let h = EventFn::arc("raw", |ev: Event| async move {
            if ev.name().as_str() == "bad" {
                Err(HandlerError::fail("bad name"))
            } else {
                Ok(())
            }
        });
        assert!(h.event_type().is_none());
        assert!(h.handle(&Event::new("good", 1_u8)).await.is_ok());
        assert!(h.handle(&Event::new("bad", 1_u8)).await.is_err());
    }
}
