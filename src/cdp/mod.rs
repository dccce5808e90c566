//! # CDP event layer
//!
//! Raw Chrome DevTools Protocol events and the broadcast source they travel
//! through before typed dispatch.
//!
//! ## Module structure
//! - `traits`: raw event type, subscription handle and the `EventSource` trait
//! - `types`: wire frame classification (responses vs notifications)
//! - `bus`: in-process fan-out bus implementing `EventSource`
//! - `mock`: recording source for tests
//!
//! ## Example
//! ```rust,no_run
//! use cdp_dispatch::cdp::{EventBus, EventSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bus = EventBus::new();
//! let mut sub = bus.subscribe();
//!
//! bus.publish_message(r#"{"method":"Page.loadEventFired","params":{"timestamp":1.0}}"#)?;
//! let event = sub.recv().await;
//! assert_eq!(event.map(|e| e.method).as_deref(), Some("Page.loadEventFired"));
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod types;
pub mod bus;
pub mod mock;


pub use traits::{CdpEvent, EventSource, Subscription, SubscriptionId};
pub use types::{CdpErrorDetail, CdpMessage, CdpNotification, CdpRpcResponse};
pub use bus::{EventBus, SubscriptionInfo};
pub use mock::MockEventSource;
