//! # Handler registry - event name to handler set.
//!
//! The registry is the only shared mutable state of a bus. It maps each
//! [`EventName`] to the set of handlers currently subscribed under it.
//!
//! ## Architecture
//! ```text
//! subscribe(name, h) ──► write lock ──► Arc::make_mut(set).insert(h)
//! cancel(name, h)    ──► write lock ──► Arc::make_mut(set).remove(h)
//! snapshot(name)     ──► read lock  ──► Arc::clone(set)   (no copy)
//! ```
//!
//! ## Rules
//! - Sets are copy-on-write: a dispatch holding a snapshot keeps seeing the set
//!   as it was when the snapshot was taken; later mutations copy the set first.
//! - Membership is keyed by handler identity (the `Arc` allocation).
//! - Insert and remove are idempotent.
//! - A name whose set becomes empty is removed from the map.
//! - Locks are never held across an `.await`; every operation is synchronous.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::events::EventName;
use crate::handlers::{handler_key, HandlerRef};

/// Point-in-time set of handlers registered under one name.
pub(crate) type HandlerSet = HashMap<usize, HandlerRef>;

/// Name-keyed registry of handler sets.
pub(crate) struct Registry {
    label: Arc<str>,
    sets: RwLock<HashMap<EventName, Arc<HandlerSet>>>,
}

impl Registry {
    /// Creates an empty registry; `label` is attached to its log records.
    pub fn new(label: Arc<str>) -> Self {
        Self {
            label,
            sets: RwLock::new(HashMap::new()),
        }
    }

    /// Adds `handler` to the set for `name`.
    ///
    /// Returns `false` if it was already there.
    pub fn insert(&self, name: &EventName, handler: &HandlerRef) -> bool {
        let key = handler_key(handler);
        let mut sets = self.write();
        let set = sets.entry(name.clone()).or_default();
        if set.contains_key(&key) {
            debug!(
                bus = &*self.label,
                event_name = %name,
                handler = handler.name(),
                "handler already subscribed"
            );
            return false;
        }
        Arc::make_mut(set).insert(key, Arc::clone(handler));
        debug!(
            bus = &*self.label,
            event_name = %name,
            handler = handler.name(),
            "handler subscribed"
        );
        true
    }

    /// Removes `handler` from the set for `name`.
    ///
    /// Returns `false` if it was not there.
    pub fn remove(&self, name: &str, handler: &HandlerRef) -> bool {
        let key = handler_key(handler);
        let mut sets = self.write();

        let now_empty = match sets.get_mut(name) {
            Some(set) if set.contains_key(&key) => {
                Arc::make_mut(set).remove(&key);
                set.is_empty()
            }
            _ => return false,
        };
        if now_empty {
            sets.remove(name);
        }
        drop(sets);

        debug!(
            bus = &*self.label,
            event_name = name,
            handler = handler.name(),
            "subscription cancelled"
        );
        true
    }

    /// Returns the current set for `name` (empty if none).
    pub fn snapshot(&self, name: &str) -> Arc<HandlerSet> {
        self.read().get(name).cloned().unwrap_or_default()
    }

    /// True if `handler` is currently in the set for `name`.
    pub fn contains(&self, name: &str, handler: &HandlerRef) -> bool {
        self.read()
            .get(name)
            .is_some_and(|set| set.contains_key(&handler_key(handler)))
    }

    /// Returns sorted list of names with at least one handler.
    pub fn names(&self) -> Vec<EventName> {
        let mut names: Vec<EventName> = self.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    fn read(&self) -> RwLockReadGuard<'_, HashMap<EventName, Arc<HandlerSet>>> {
        self.sets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<EventName, Arc<HandlerSet>>> {
        self.sets.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::events::Event;
    use crate::handlers::Handler;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Handler for Noop {
        async fn handle(&self, _event: &Event) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    fn registry() -> Registry {
        Registry::new(Arc::from("test"))
    }

    #[test]
    fn test_insert_is_idempotent() {
        let reg = registry();
        let h: HandlerRef = Arc::new(Noop);
        let name = EventName::from("a");

        assert!(reg.insert(&name, &h));
        assert!(!reg.insert(&name, &Arc::clone(&h)));
        assert_eq!(reg.snapshot("a").len(), 1);
    }

    #[test]
    fn test_same_handler_under_two_names() {
        let reg = registry();
        let h: HandlerRef = Arc::new(Noop);

        reg.insert(&EventName::from("a"), &h);
        reg.insert(&EventName::from("b"), &h);
        assert!(reg.remove("a", &h));
        assert!(!reg.contains("a", &h));
        assert!(reg.contains("b", &h));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let reg = registry();
        let h: HandlerRef = Arc::new(Noop);
        assert!(!reg.remove("missing", &h));

        reg.insert(&EventName::from("a"), &h);
        assert!(reg.remove("a", &h));
        assert!(!reg.remove("a", &h));
    }

    #[test]
    fn test_empty_sets_are_dropped() {
        let reg = registry();
        let h: HandlerRef = Arc::new(Noop);
        reg.insert(&EventName::from("b"), &h);
        reg.insert(&EventName::from("a"), &h);
        assert_eq!(reg.names(), vec![EventName::from("a"), EventName::from("b")]);

        reg.remove("a", &h);
        assert_eq!(reg.names(), vec![EventName::from("b")]);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_mutation() {
        let reg = registry();
        let h1: HandlerRef = Arc::new(Noop);
        let h2: HandlerRef = Arc::new(Noop);
        let name = EventName::from("a");
        reg.insert(&name, &h1);

        let snap = reg.snapshot("a");
        reg.insert(&name, &h2);
        reg.remove("a", &h1);

        assert_eq!(snap.len(), 1);
        assert!(snap.contains_key(&handler_key(&h1)));
        assert_eq!(reg.snapshot("a").len(), 1);
        assert!(reg.contains("a", &h2));
    }

    #[test]
    fn test_snapshot_of_unknown_name_is_empty() {
        assert!(registry().snapshot("nobody").is_empty());
    }
}
