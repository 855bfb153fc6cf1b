//! # Routing keys: event names and type descriptors.
//!
//! [`EventName`] is the only key the registry routes on. [`EventType`] is a
//! runtime descriptor of a Rust type whose short identifier doubles as the
//! default event name.
//!
//! ## Short names
//! The identifier drops the module path from every path segment and keeps
//! generic arguments:
//! ```text
//! billing::events::InvoicePaid            ─► InvoicePaid
//! alloc::vec::Vec<billing::events::Line>  ─► Vec<Line>
//! (i32, alloc::string::String)            ─► (i32, String)
//! ```

use std::any::{Any, TypeId};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// String key used to route events to handlers.
///
/// Cheap to clone (`Arc<str>` inside). Compares and hashes as a plain string,
/// so maps keyed by `EventName` can be queried with `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(Arc<str>);

impl EventName {
    /// Creates a name from any string-like value.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for EventName {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Runtime descriptor of an event type.
///
/// Equality and hashing use the [`TypeId`] only.
///
/// # Example
/// ```
/// use evbus::EventType;
///
/// struct UserCreated;
///
/// let ty = EventType::of::<UserCreated>();
/// assert_eq!(ty.name().as_str(), "UserCreated");
/// assert!(ty.is::<UserCreated>());
/// ```
#[derive(Clone)]
pub struct EventType {
    id: TypeId,
    type_name: &'static str,
    name: EventName,
}

impl EventType {
    /// Descriptor for `E`.
    pub fn of<E: Any + ?Sized>() -> Self {
        let type_name = std::any::type_name::<E>();
        Self {
            id: TypeId::of::<E>(),
            type_name,
            name: EventName::from(short_type_name(type_name)),
        }
    }

    /// The [`TypeId`] of the described type.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by [`std::any::type_name`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Short identifier used as the event name when none is given explicitly.
    #[inline]
    pub fn name(&self) -> &EventName {
        &self.name
    }

    /// True if this descriptor describes `E`.
    #[inline]
    pub fn is<E: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

/// Strips the module path from every path segment of a type name.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut rest = full;

    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("::") {
            out.truncate(segment_start);
            rest = tail;
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Ping;

    #[test]
    fn test_short_name_plain_path() {
        assert_eq!(short_type_name("billing::events::InvoicePaid"), "InvoicePaid");
        assert_eq!(short_type_name("u64"), "u64");
    }

    #[test]
    fn test_short_name_keeps_generics() {
        assert_eq!(
            short_type_name("alloc::vec::Vec<billing::events::Line>"),
            "Vec<Line>"
        );
        assert_eq!(
            short_type_name("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
        assert_eq!(short_type_name("(i32, alloc::string::String)"), "(i32, String)");
        assert_eq!(short_type_name("&str"), "&str");
    }

    #[test]
    fn test_event_type_of_local_struct() {
        let ty = EventType::of::<Ping>();
        assert_eq!(ty.name().as_str(), "Ping");
        assert!(ty.type_name().ends_with("::Ping"));
        assert!(ty.is::<Ping>());
        assert!(!ty.is::<String>());
        assert_eq!(ty, EventType::of::<Ping>());
        assert_ne!(ty, EventType::of::<String>());
    }

    #[test]
    fn test_event_name_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(EventName::from("DictEvent"), 1);
        assert_eq!(map.get("DictEvent"), Some(&1));
        assert_eq!(EventName::from(String::from("a")), EventName::new("a"));
        assert_eq!(format!("{}", EventName::from("x")), "x");
    }
}
