//! # Quick Example
//!
//! Registers a handler forever on the process-wide default bus and publishes once.
//!
//! ## Run
//! ```bash
//! cargo run --example quick
//! ```

use std::sync::Arc;
use std::time::SystemTime;

use evbus::{event_bus, HandlerError, HandlerFn, Route};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
#[allow(dead_code)]
struct UserCreated {
    user_id: String,
    name: String,
    created_at: SystemTime,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let register = event_bus().handler(Route::new());
    register(HandlerFn::arc("email", |ev: Arc<UserCreated>| async move {
        println!("Send email: <Hello, '{}'>.", ev.name);
        Ok::<_, HandlerError>(())
    }))?;

    event_bus()
        .sync_publish(UserCreated {
            user_id: "1".into(),
            name: "Don McLean".into(),
            created_at: SystemTime::now(),
        })
        .await;
    Ok(())
}
