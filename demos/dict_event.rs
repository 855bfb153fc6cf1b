//! # Mapping Event Example
//!
//! Routes a plain map by an explicit event name instead of its type.
//!
//! ## Run
//! ```bash
//! cargo run --example dict_event
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use evbus::{event_bus, HandlerError, HandlerFn, Route};
use tracing_subscriber::EnvFilter;

type Mapping = BTreeMap<String, String>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let subscription = event_bus().subscribe_with(
        HandlerFn::arc("mapping", |data: Arc<Mapping>| async move {
            println!("Handle mapping event: '{data:?}'.");
            Ok::<_, HandlerError>(())
        }),
        Route::named("DictEvent"),
    )?;

    let event = Mapping::from([("foo".to_string(), "bar".to_string())]);
    event_bus().publish_with(event, Route::named("DictEvent"));
    event_bus().idle().await;

    subscription.cancel();
    Ok(())
}
