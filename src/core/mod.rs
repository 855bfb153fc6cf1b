//! Bus core: registry, dispatch and subscriptions.
//!
//! The public API from this module is [`EventBus`], [`Subscription`] and the
//! default instance accessor [`event_bus`].
//!
//! ```text
//! publish / sync_publish ──► Route::resolve_publish ──► Registry::snapshot(name)
//!                                                              │
//!                                       ┌──────────────────────┴──────────────┐
//!                                  spawn per handler                   loop, awaited
//!                                       └──────────► dispatch::invoke ◄───────┘
//!
//! subscribe ──► Route::resolve_subscribe ──► Registry::insert ──► Subscription
//! Subscription::cancel ─────────────────────► Registry::remove
//! ```
//!
//! Internal modules:
//! - [`registry`]: name-keyed copy-on-write handler sets;
//! - [`dispatch`]: one handler invocation with failure isolation;
//! - [`bus`]: the two delivery modes and registration;
//! - [`subscription`]: cancellable registration handle.

mod bus;
mod dispatch;
mod registry;
mod subscription;

pub use bus::{event_bus, EventBus};
pub use subscription::Subscription;
