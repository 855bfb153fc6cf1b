//! # Event bus: registration and the two delivery modes.
//!
//! [`EventBus`] owns a [`Registry`] and dispatches published events to the
//! handlers registered under the resolved event name.
//!
//! ## Delivery modes
//! ```text
//! publish(ev)                                  sync_publish(ev).await
//!   │ resolve name, snapshot set                 │ resolve name, snapshot set
//!   ├──► spawn ─► invoke(h1, ev)                 ├──► invoke(h1, ev).await
//!   ├──► spawn ─► invoke(h2, ev)                 ├──► invoke(h2, ev).await
//!   └──► spawn ─► invoke(hN, ev)                 └──► invoke(hN, ev).await
//!   returns immediately                          returns after the last handler
//! ```
//!
//! ## Rules
//! - **Fire-and-forget**: `publish` never waits for handlers and never observes their results.
//! - **Sequential**: `sync_publish` runs handlers one after another in the caller's task.
//! - **Isolation**: a failing or panicking handler is logged and skipped; siblings still run.
//! - **Snapshots**: both modes dispatch to the set as it was when the call resolved it.
//! - **No handlers**: publishing to a name nobody listens on is a silent no-op (debug log only).
//! - Order of handlers within one publish is unspecified.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use evbus::{EventBus, HandlerError, HandlerFn};
//!
//! #[derive(Debug)]
//! struct UserCreated { id: u64 }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), evbus::ConfigurationError> {
//! let bus = EventBus::new();
//! let sub = bus.subscribe(HandlerFn::arc("welcome", |ev: Arc<UserCreated>| async move {
//!     println!("welcome user {}", ev.id);
//!     Ok::<_, HandlerError>(())
//! }))?;
//! assert_eq!(sub.event_name().as_str(), "UserCreated");
//!
//! bus.sync_publish(UserCreated { id: 1 }).await;
//! bus.publish(UserCreated { id: 2 });
//! bus.idle().await;
//!
//! sub.cancel();
//! # Ok(())
//! # }
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error};

use crate::config::BusConfig;
use crate::core::dispatch::invoke;
use crate::core::registry::Registry;
use crate::core::subscription::Subscription;
use crate::error::ConfigurationError;
use crate::events::{Event, EventName, EventType, Route};
use crate::handlers::HandlerRef;

static DEFAULT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Returns the process-wide default bus, creating it on first use.
///
/// Independent buses can still be created with [`EventBus::new`]; they share nothing
/// with the default instance.
pub fn event_bus() -> &'static EventBus {
    DEFAULT_BUS.get_or_init(EventBus::new)
}

struct Inner {
    cfg: BusConfig,
    label: Arc<str>,
    registry: Arc<Registry>,
    tracker: TaskTracker,
}

/// In-process publish/subscribe bus.
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    /// Creates a bus with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates a bus with the given configuration.
    #[must_use]
    pub fn with_config(cfg: BusConfig) -> Self {
        let label: Arc<str> = Arc::from(cfg.label());
        Self {
            inner: Arc::new(Inner {
                registry: Arc::new(Registry::new(Arc::clone(&label))),
                label,
                cfg,
                tracker: TaskTracker::new(),
            }),
        }
    }

    /// Configuration this bus was created with.
    pub fn config(&self) -> &BusConfig {
        &self.inner.cfg
    }

    // ---------------------------
    // Publishing
    // ---------------------------

    /// Publishes `event` under its own type name, without waiting for handlers.
    ///
    /// See [`publish_with`](Self::publish_with).
    pub fn publish<E>(&self, event: E)
    where
        E: Any + Send + Sync + fmt::Debug,
    {
        self.publish_with(event, Route::new());
    }

    /// Publishes `event` under the name resolved from `route`, without waiting for handlers.
    ///
    /// Each handler in the snapshot gets its own tokio task; the call returns as soon
    /// as they are spawned. Handler failures are logged and never reach the caller.
    ///
    /// Must be called from within a tokio runtime to deliver anything. Outside of one
    /// the event is dropped and an error is logged.
    pub fn publish_with<E>(&self, event: E, route: Route)
    where
        E: Any + Send + Sync + fmt::Debug,
    {
        let event = self.envelope(event, &route);
        let handlers = self.inner.registry.snapshot(event.name().as_str());
        self.log_published("async", &event, handlers.len());

        if handlers.is_empty() {
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            error!(
                bus = &*self.inner.label,
                event_name = %event.name(),
                event = event.repr(),
                "publish called outside of a tokio runtime; event dropped"
            );
            return;
        };

        for handler in handlers.values() {
            let handler = Arc::clone(handler);
            let event = event.clone();
            let label = Arc::clone(&self.inner.label);
            self.inner.tracker.spawn_on(
                async move { invoke(&label, &handler, &event).await },
                &runtime,
            );
        }
    }

    /// Publishes `event` under its own type name and waits for every handler.
    ///
    /// See [`sync_publish_with`](Self::sync_publish_with).
    pub async fn sync_publish<E>(&self, event: E)
    where
        E: Any + Send + Sync + fmt::Debug,
    {
        self.sync_publish_with(event, Route::new()).await;
    }

    /// Publishes `event` under the name resolved from `route`, running handlers one
    /// after another in the calling task.
    ///
    /// Returns once every handler in the snapshot has finished, successfully or not.
    /// A failing handler does not stop the remaining ones.
    pub async fn sync_publish_with<E>(&self, event: E, route: Route)
    where
        E: Any + Send + Sync + fmt::Debug,
    {
        let event = self.envelope(event, &route);
        let handlers = self.inner.registry.snapshot(event.name().as_str());
        self.log_published("sync", &event, handlers.len());

        for handler in handlers.values() {
            invoke(&self.inner.label, handler, &event).await;
        }
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Subscribes `handler` under the type it declares.
    ///
    /// See [`subscribe_with`](Self::subscribe_with).
    pub fn subscribe(&self, handler: HandlerRef) -> Result<Subscription, ConfigurationError> {
        self.subscribe_with(handler, Route::new())
    }

    /// Subscribes `handler` under the name resolved from `route`.
    ///
    /// Subscribing an already registered handler to the same name is a no-op that
    /// still returns a handle for the pair.
    ///
    /// # Errors
    /// [`ConfigurationError::Unresolvable`] if the route has neither a name nor a type
    /// and the handler declares no event type. Nothing is registered in that case.
    pub fn subscribe_with(
        &self,
        handler: HandlerRef,
        route: Route,
    ) -> Result<Subscription, ConfigurationError> {
        let (name, event_type) = route.resolve_subscribe(handler.event_type(), handler.name())?;
        self.inner.registry.insert(&name, &handler);
        Ok(Subscription::new(
            name,
            event_type,
            handler,
            Arc::downgrade(&self.inner.registry),
        ))
    }

    /// Returns a registration function bound to `route`.
    ///
    /// Every handler passed to it is subscribed and its [`Subscription`] discarded, so it
    /// stays registered for the lifetime of the bus.
    ///
    /// ## Example
    /// ```rust
    /// use evbus::{Event, EventBus, EventFn, Route};
    ///
    /// let bus = EventBus::new();
    /// let register = bus.handler(Route::named("audit"));
    /// register(EventFn::arc("audit-log", |_ev: Event| async { Ok(()) })).unwrap();
    /// assert_eq!(bus.handlers("audit").len(), 1);
    /// ```
    pub fn handler(
        &self,
        route: Route,
    ) -> impl Fn(HandlerRef) -> Result<(), ConfigurationError> + Send + Sync + 'static {
        let bus = self.clone();
        move |handler| bus.subscribe_with(handler, route.clone()).map(drop)
    }

    // ---------------------------
    // Introspection
    // ---------------------------

    /// Snapshot of the handlers currently registered under `name`.
    pub fn handlers(&self, name: &str) -> Vec<HandlerRef> {
        self.inner
            .registry
            .snapshot(name)
            .values()
            .cloned()
            .collect()
    }

    /// True if `handler` is currently registered under `name`.
    pub fn contains(&self, name: &str, handler: &HandlerRef) -> bool {
        self.inner.registry.contains(name, handler)
    }

    /// Sorted names that have at least one handler.
    pub fn names(&self) -> Vec<EventName> {
        self.inner.registry.names()
    }

    /// Number of handler invocations scheduled by `publish` that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.inner.tracker.len()
    }

    /// Waits until every handler invocation scheduled by `publish` so far has finished.
    ///
    /// Invocations scheduled while waiting are awaited too. Nothing is cancelled.
    pub async fn idle(&self) {
        self.inner.tracker.close();
        self.inner.tracker.wait().await;
        self.inner.tracker.reopen();
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    fn envelope<E>(&self, event: E, route: &Route) -> Event
    where
        E: Any + Send + Sync + fmt::Debug,
    {
        let name = route.resolve_publish(&EventType::of::<E>());
        Event::new(name, event)
    }

    fn log_published(&self, mode: &'static str, event: &Event, handlers: usize) {
        debug!(
            bus = &*self.inner.label,
            mode,
            event_name = %event.name(),
            event = event.repr(),
            handlers,
            "event published"
        );
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("label", &self.inner.label)
            .field("names", &self.names())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}
