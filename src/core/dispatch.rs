//! # Single handler invocation with failure isolation.
//!
//! Both delivery modes funnel every handler call through [`invoke`]:
//!
//! ```text
//! invoke(handler, event)
//!   ├─► handler.handle(&event)          (catch_unwind around the future)
//!   │       ├─ Ok(())      ─► done
//!   │       ├─ Err(e)      ─► error! log, suppressed
//!   │       └─ panic       ─► HandlerError::Panicked ─► error! log, suppressed
//!   └─► returns () in every case
//! ```
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a handler uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::error;

use crate::error::HandlerError;
use crate::events::Event;
use crate::handlers::HandlerRef;

/// Runs one handler on one event; failures are logged and swallowed.
pub(crate) async fn invoke(bus: &str, handler: &HandlerRef, event: &Event) {
    let outcome = match AssertUnwindSafe(handler.handle(event)).catch_unwind().await {
        Ok(result) => result,
        Err(panic_err) => Err(HandlerError::Panicked {
            info: panic_info(&*panic_err),
        }),
    };

    if let Err(err) = outcome {
        error!(
            bus,
            event_name = %event.name(),
            event = event.repr(),
            handler = handler.name(),
            kind = err.as_label(),
            error = %err,
            "error during event processing"
        );
    }
}

fn panic_info(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{EventFn, HandlerFn};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_panic_info_variants() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_info(&*s), "static");
        let s: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_info(&*s), "owned");
        let s: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_info(&*s), "unknown panic");
    }

    #[tokio::test]
    async fn test_invoke_swallows_errors_and_panics() {
        let failing: HandlerRef =
            EventFn::arc("failing", |_ev: Event| async { Err(HandlerError::fail("nope")) });
        let panicking: HandlerRef = EventFn::arc("panicking", |ev: Event| async move {
            if ev.name().as_str() == "x" {
                panic!("handler exploded");
            }
            Ok(())
        });
        let event = Event::new("x", 1_i32);

        invoke("test", &failing, &event).await;
        invoke("test", &panicking, &event).await;
    }

    #[tokio::test]
    async fn test_invoke_runs_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let handler: HandlerRef = HandlerFn::arc("count", move |_ev: Arc<i32>| {
            let h = Arc::clone(&h);
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        invoke("test", &handler, &Event::new("x", 1_i32)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
