//! CDP event source traits
//!
//! This module defines the raw event type and the broadcast interface the
//! dispatch layer consumes.

use bytes::Bytes;
use futures::Stream;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Raw CDP event as it arrives from the transport
#[derive(Debug, Clone, PartialEq)]
pub struct CdpEvent {
    /// Event method (e.g., "Page.loadEventFired")
    pub method: String,
    /// Undecoded event parameters (JSON)
    pub params: Bytes,
    /// Session ID (for multi-session targets)
    pub session_id: Option<String>,
}

impl CdpEvent {
    /// Create a raw event without a session
    pub fn new<M: Into<String>, P: Into<Bytes>>(method: M, params: P) -> Self {
        Self {
            method: method.into(),
            params: params.into(),
            session_id: None,
        }
    }

    /// Attach a session ID
    pub fn with_session<S: Into<String>>(mut self, session_id: S) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random subscription ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receiving side of one broadcast subscription.
///
/// Yields events in the order the source published them and ends once the
/// source drops its sender (unsubscribe or close).
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<CdpEvent>,
}

impl Subscription {
    /// Wrap a receiver handed out by an event source
    pub fn new(id: SubscriptionId, receiver: mpsc::UnboundedReceiver<CdpEvent>) -> Self {
        Self { id, receiver }
    }

    /// Subscription ID
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Receive the next event, `None` once the source is gone
    pub async fn recv(&mut self) -> Option<CdpEvent> {
        self.receiver.recv().await
    }
}

impl Stream for Subscription {
    type Item = CdpEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<CdpEvent>> {
        self.receiver.poll_recv(cx)
    }
}

/// Broadcast source of raw CDP events
///
/// Every current subscriber receives its own copy of each event, in
/// publication order. Both methods are synchronous so that a subscription
/// can be released from a `Drop` impl.
pub trait EventSource: Send + Sync {
    /// Join the broadcast
    fn subscribe(&self) -> Subscription;

    /// Leave the broadcast. Unknown IDs are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

impl<S: EventSource + ?Sized> EventSource for std::sync::Arc<S> {
    fn subscribe(&self) -> Subscription {
        (**self).subscribe()
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }
}
