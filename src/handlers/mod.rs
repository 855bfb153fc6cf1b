//! # Handler abstractions.
//!
//! This module provides the handler-related types:
//! - [`Handler`] - trait for implementing async event handlers
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handler>`)
//! - [`HandlerFn`] - typed closure-backed handler (declares its event type)
//! - [`EventFn`] - untyped closure-backed handler over the raw [`Event`](crate::Event)

mod handler;
mod handler_fn;

pub(crate) use handler::handler_key;
pub use handler::{Handler, HandlerRef};
pub use handler_fn::{EventFn, HandlerFn};
