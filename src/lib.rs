//! # evbus
//!
//! **evbus** is an in-process publish/subscribe event bus for tokio applications.
//!
//! Components register handlers under event names and get notified when matching
//! events are published, either fire-and-forget or sequentially. It is a decoupling
//! mechanism within one process: no persistence, no cross-process transport and no
//! ordering guarantees across publishers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   publish(ev) / sync_publish(ev)         subscribe(handler) / handler(route)
//!              │                                        │
//!              ▼                                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Route (name resolution)                                          │
//! │  explicit name ─► explicit type ─► payload type / declared type   │
//! └──────┬──────────────────────────────────────────────────┬─────────┘
//!        ▼                                                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry: EventName ─► { handler, handler, ... }  (copy-on-write) │
//! └──────┬──────────────────────────────────────────────────▲─────────┘
//!        │ snapshot                                         │ remove
//!        ▼                                                  │
//! ┌──────────────────────────────┐                  ┌───────┴────────┐
//! │ publish:  one task / handler │                  │  Subscription  │
//! │ sync:     awaited in turn    │                  │    .cancel()   │
//! └──────┬───────────────────────┘                  └────────────────┘
//!        ▼
//!   handler.handle(&Event)   errors and panics caught, logged, suppressed
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                     |
//! |-------------------|---------------------------------------------------------------|----------------------------------------|
//! | **Bus**           | Publish (async or sync), subscribe, register-forever helper.  | [`EventBus`], [`event_bus`]            |
//! | **Handlers**      | Async handlers as trait objects or closures.                  | [`Handler`], [`HandlerFn`], [`EventFn`]|
//! | **Routing**       | Event names from explicit names or type descriptors.          | [`Route`], [`EventName`], [`EventType`]|
//! | **Subscriptions** | Idempotent cancellation handles.                              | [`Subscription`]                       |
//! | **Errors**        | Typed registration and handler errors.                        | [`ConfigurationError`], [`HandlerError`]|
//! | **Configuration** | Per-instance settings.                                        | [`BusConfig`]                          |
//!
//! ## Logging
//! The bus emits [`tracing`] records: `debug` on every publish, subscribe and cancel,
//! `error` on every handler failure (with the event's `Debug` representation).
//! Installing a subscriber is up to the application.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use evbus::{Event, EventBus, EventFn, HandlerError, HandlerFn, Route};
//!
//! #[derive(Debug)]
//! struct OrderPlaced { id: u64 }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = EventBus::new();
//!
//!     // Typed handler: the event name is inferred from `OrderPlaced`.
//!     let sub = bus.subscribe(HandlerFn::arc("mailer", |ev: Arc<OrderPlaced>| async move {
//!         println!("order {} placed", ev.id);
//!         Ok::<_, HandlerError>(())
//!     }))?;
//!
//!     // Untyped handler: needs an explicit name or type.
//!     let register = bus.handler(Route::typed::<OrderPlaced>());
//!     register(EventFn::arc("audit", |ev: Event| async move {
//!         println!("audit: {}", ev.repr());
//!         Ok(())
//!     }))?;
//!
//!     bus.publish(OrderPlaced { id: 1 });        // fire-and-forget
//!     bus.sync_publish(OrderPlaced { id: 2 }).await; // waits for both handlers
//!     bus.idle().await;
//!
//!     sub.cancel();
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod handlers;

// ---- Public re-exports ----

pub use config::{BusConfig, DEFAULT_LABEL};
pub use crate::core::{event_bus, EventBus, Subscription};
pub use error::{ConfigurationError, HandlerError};
pub use events::{Event, EventName, EventType, Route};
pub use handlers::{EventFn, Handler, HandlerFn, HandlerRef};
