//! # Base Example
//!
//! Shows the full lifecycle on a dedicated bus:
//! - subscribe a typed handler (event name inferred from its event type)
//! - publish fire-and-forget, then wait for the handler
//! - cancel the subscription
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example base
//! ```

use std::sync::Arc;
use std::time::SystemTime;

use evbus::{EventBus, HandlerError, HandlerFn};
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

    let bus = EventBus::new();

    let email = HandlerFn::arc("email", |ev: Arc<UserCreated>| async move {
        println!("Send email: <Hello, '{}'>.", ev.name);
        Ok::<_, HandlerError>(())
    });

    // Name comes from the handler's event type: "UserCreated".
    let subscription = bus.subscribe(email)?;
    println!("subscribed: {subscription:?}");

    bus.publish(UserCreated {
        user_id: "1".into(),
        name: "Steve Buscemi".into(),
        created_at: SystemTime::now(),
    });
    bus.idle().await;

    subscription.cancel();
    println!("active after cancel: {}", subscription.is_active());
    Ok(())
}
