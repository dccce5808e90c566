//! Mock event source for testing
//!
//! Wraps an [`EventBus`] and records every subscribe/unsubscribe call so
//! tests can assert that subscriptions are released exactly once.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::bus::EventBus;
use super::traits::{CdpEvent, EventSource, Subscription, SubscriptionId};

/// Recording event source
#[derive(Debug, Default)]
pub struct MockEventSource {
    bus: EventBus,
    subscribe_calls: AtomicUsize,
    released: Mutex<Vec<SubscriptionId>>,
}

impl MockEventSource {
    /// Create a new mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a raw event to current subscribers
    pub fn emit(&self, event: CdpEvent) -> usize {
        self.bus.publish(event)
    }

    /// Publish a JSON payload under the given method
    pub fn emit_json(&self, method: &str, params: serde_json::Value) -> usize {
        let params = serde_json::to_vec(&params).unwrap_or_default();
        self.emit(CdpEvent::new(method, params))
    }

    /// Close the underlying bus
    pub fn close(&self) {
        self.bus.close();
    }

    /// Number of subscribe calls so far
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Every unsubscribe call so far, in call order (duplicates kept)
    pub fn released(&self) -> Vec<SubscriptionId> {
        self.released.lock().clone()
    }

    /// Number of unsubscribe calls so far
    pub fn unsubscribe_calls(&self) -> usize {
        self.released.lock().len()
    }

    /// Number of subscriptions still attached to the bus
    pub fn active_subscriptions(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Wait until at least `count` subscriptions are attached
    pub async fn wait_for_subscribers(&self, count: usize) {
        self.bus.wait_for_subscribers(count).await;
    }
}

impl EventSource for MockEventSource {
    fn subscribe(&self) -> Subscription {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.bus.subscribe()
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.released.lock().push(id);
        self.bus.unsubscribe(id);
    }
}
