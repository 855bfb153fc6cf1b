//! # Dispatch envelope handed to handlers.
//!
//! The bus never inspects payloads. An [`Event`] wraps the published value as
//! `Arc<dyn Any + Send + Sync>` together with the resolved [`EventName`], the
//! runtime [`EventType`] of the payload and its `Debug` representation.
//!
//! The representation is rendered on the first [`Event::repr`] call and then
//! shared by every clone. A publish whose log records are all filtered out never
//! renders it.
//!
//! Cloning an `Event` is cheap: all fields are reference counted.
//!
//! ## Example
//! ```rust
//! use evbus::Event;
//!
//! #[derive(Debug)]
//! struct OrderPlaced { id: u64 }
//!
//! let ev = Event::new("orders", OrderPlaced { id: 7 });
//! assert_eq!(ev.name().as_str(), "orders");
//! assert_eq!(ev.event_type().name().as_str(), "OrderPlaced");
//! assert_eq!(ev.downcast_ref::<OrderPlaced>().map(|o| o.id), Some(7));
//! assert_eq!(ev.repr(), "OrderPlaced { id: 7 }");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::name::{EventName, EventType};

/// A published value on its way to handlers.
#[derive(Clone)]
pub struct Event {
    name: EventName,
    event_type: EventType,
    payload: Arc<dyn Any + Send + Sync>,
    repr: Arc<OnceLock<String>>,
    render: fn(&(dyn Any + Send + Sync)) -> String,
}

impl Event {
    /// Wraps `payload` under `name`.
    pub fn new<E>(name: impl Into<EventName>, payload: E) -> Self
    where
        E: Any + Send + Sync + fmt::Debug,
    {
        Self {
            name: name.into(),
            event_type: EventType::of::<E>(),
            payload: Arc::new(payload),
            repr: Arc::new(OnceLock::new()),
            render: render_debug::<E>,
        }
    }

    /// Name the event was routed under.
    #[inline]
    pub fn name(&self) -> &EventName {
        &self.name
    }

    /// Runtime type of the payload.
    #[inline]
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// `Debug` representation of the payload, rendered on first use.
    pub fn repr(&self) -> &str {
        self.repr.get_or_init(|| (self.render)(&*self.payload))
    }

    /// True if the payload is an `E`.
    #[inline]
    pub fn is<E: Any>(&self) -> bool {
        self.payload.is::<E>()
    }

    /// Borrows the payload as `E`.
    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }

    /// Shares the payload as `Arc<E>`.
    pub fn downcast<E: Any + Send + Sync>(&self) -> Option<Arc<E>> {
        Arc::clone(&self.payload).downcast::<E>().ok()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("type", &self.event_type)
            .field("payload", &format_args!("{}", self.repr()))
            .finish()
    }
}

fn render_debug<E: Any + fmt::Debug>(payload: &(dyn Any + Send + Sync)) -> String {
    payload
        .downcast_ref::<E>()
        .map(|event| format!("{event:?}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_downcast_matches_runtime_type() {
        let ev = Event::new("n", 42_u32);
        assert!(ev.is::<u32>());
        assert_eq!(ev.downcast_ref::<u32>(), Some(&42));
        assert!(ev.downcast_ref::<i64>().is_none());
        assert_eq!(ev.downcast::<u32>().as_deref(), Some(&42));
        assert!(ev.downcast::<String>().is_none());
    }

    #[test]
    fn test_repr_renders_payload() {
        let mut map = BTreeMap::new();
        map.insert("foo", "bar");
        let ev = Event::new("DictEvent", map);
        assert_eq!(ev.repr(), r#"{"foo": "bar"}"#);
        let clone = ev.clone();
        assert_eq!(clone.repr(), ev.repr());
        assert!(format!("{ev:?}").contains("DictEvent"));
    }

    static RENDERS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl fmt::Debug for Counted {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            RENDERS.fetch_add(1, Ordering::SeqCst);
            f.write_str("Counted")
        }
    }

    #[test]
    fn test_repr_is_lazy_and_shared_by_clones() {
        let ev = Event::new("counted", Counted);
        let clone = ev.clone();
        assert_eq!(RENDERS.load(Ordering::SeqCst), 0);

        assert_eq!(clone.repr(), "Counted");
        assert_eq!(ev.repr(), "Counted");
        assert_eq!(clone.repr(), "Counted");
        assert_eq!(RENDERS.load(Ordering::SeqCst), 1);
    }
}
