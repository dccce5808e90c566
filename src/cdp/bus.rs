//! In-process broadcast bus for raw CDP events
//!
//! Every subscriber owns an unbounded queue, so a slow consumer never holds
//! up `publish` or the other subscribers. Nothing is ever dropped: a
//! consumer that falls behind simply accumulates a longer queue.

use super::traits::{CdpEvent, EventSource, Subscription, SubscriptionId};
use super::types::{CdpMessage, CdpRpcResponse};
use crate::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, instrument, warn};

/// Per-subscriber delivery state
#[derive(Debug)]
struct Subscriber {
    sender: mpsc::UnboundedSender<CdpEvent>,
    created_at: DateTime<Utc>,
}

/// Public view of an active subscription
#[derive(Debug, Clone)]
pub struct SubscriptionInfo {
    /// Subscription ID
    pub id: SubscriptionId,
    /// Subscription timestamp
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct BusInner {
    subscribers: Mutex<HashMap<SubscriptionId, Subscriber>>,
    closed: AtomicBool,
    /// Signalled on every subscribe and on close
    attached: Notify,
}

/// Fan-out event bus
///
/// Cloning yields another handle to the same bus.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Create a new, open event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every current subscriber.
    ///
    /// Returns the number of subscribers that received it. Subscribers whose
    /// receiving side is gone are pruned.
    pub fn publish(&self, event: CdpEvent) -> usize {
        let mut subscribers = self.inner.subscribers.lock();

        if self.is_closed() {
            debug!("Bus closed, dropping event {}", event.method);
            return 0;
        }

        let mut delivered = 0;
        subscribers.retain(|id, subscriber| {
            if subscriber.sender.send(event.clone()).is_ok() {
                delivered += 1;
                true
            } else {
                debug!("Pruning dead subscriber {}", id);
                false
            }
        });

        delivered
    }

    /// Parse a CDP text frame and publish it if it is a notification.
    ///
    /// Responses are not events; they are handed back to the caller.
    #[instrument(skip(self, text))]
    pub fn publish_message(&self, text: &str) -> Result<Option<CdpRpcResponse>> {
        match CdpMessage::parse(text)? {
            CdpMessage::Notification(notification) => {
                let event = CdpEvent::from_notification(notification)?;
                let delivered = self.publish(event);
                debug!("Published notification to {} subscribers", delivered);
                Ok(None)
            }
            CdpMessage::Response(response) => Ok(Some(response)),
        }
    }

    /// Close the bus.
    ///
    /// Every subscription drains what is already queued and then ends.
    /// Later subscriptions end immediately.
    #[instrument(skip(self))]
    pub fn close(&self) {
        let mut subscribers = self.inner.subscribers.lock();
        self.inner.closed.store(true, Ordering::SeqCst);
        let count = subscribers.len();
        subscribers.clear();
        drop(subscribers);
        self.inner.attached.notify_waiters();

        info!("Event bus closed ({} subscribers released)", count);
    }

    /// Whether the bus has been closed
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Wait until at least `count` subscriptions are attached or the bus closes
    pub async fn wait_for_subscribers(&self, count: usize) {
        loop {
            let attached = self.inner.attached.notified();
            tokio::pin!(attached);
            attached.as_mut().enable();

            if self.is_closed() || self.subscriber_count() >= count {
                return;
            }
            attached.await;
        }
    }

    /// List active subscriptions
    pub fn list_subscriptions(&self) -> Vec<SubscriptionInfo> {
        self.inner
            .subscribers
            .lock()
            .iter()
            .map(|(id, subscriber)| SubscriptionInfo {
                id: *id,
                created_at: subscriber.created_at,
            })
            .collect()
    }
}

impl EventSource for EventBus {
    fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = SubscriptionId::new();

        let mut subscribers = self.inner.subscribers.lock();
        if self.is_closed() {
            warn!("Subscribing to a closed bus, subscription {} ends immediately", id);
            return Subscription::new(id, receiver);
        }

        subscribers.insert(
            id,
            Subscriber {
                sender,
                created_at: Utc::now(),
            },
        );
        drop(subscribers);
        self.inner.attached.notify_waiters();

        info!("Created subscription: {}", id);
        Subscription::new(id, receiver)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.inner.subscribers.lock().remove(&id).is_some() {
            info!("Removed subscription: {}", id);
        } else {
            debug!("Subscription already gone: {}", id);
        }
    }
}
