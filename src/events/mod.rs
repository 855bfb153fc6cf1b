//! Events: routing keys, name resolution and the dispatch envelope.
//!
//! ## Contents
//! - [`EventName`], [`EventType`] routing key and type descriptor
//! - [`Route`] explicit name/type for one call, and the resolution rules
//! - [`Event`] envelope carrying the payload to handlers
//!
//! See `core/mod.rs` for how these flow through the bus.

mod event;
mod name;
mod route;

pub use event::Event;
pub use name::{EventName, EventType};
pub use route::Route;
