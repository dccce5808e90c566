//! Long-running typed subscriptions
//!
//! ```text
//!  subscribe ──► recv ──► tag match? ──no──► recv
//!                 │            │yes
//!        closed / cancelled  decode ──► handler ──► stop? ──no──► recv
//!                 │                                   │yes
//!                 └──────────► unsubscribe ◄──────────┘
//! ```

use super::filter::{DecodeFailurePolicy, EventFilter};
use crate::cdp::{EventSource, Subscription};
use crate::error::Result;
use crate::proto::Event;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handler verdict after one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep receiving
    Continue,
    /// Leave the loop
    Stop,
}

/// Return types accepted from an event handler.
///
/// `()` never stops, `true` stops, `Err` stops and is returned from the loop.
pub trait HandlerFlow {
    /// Interpret the handler's return value
    fn into_flow(self) -> Result<Flow>;
}

impl HandlerFlow for () {
    fn into_flow(self) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

impl HandlerFlow for bool {
    fn into_flow(self) -> Result<Flow> {
        Ok(if self { Flow::Stop } else { Flow::Continue })
    }
}

impl HandlerFlow for Flow {
    fn into_flow(self) -> Result<Flow> {
        Ok(self)
    }
}

impl<T: HandlerFlow> HandlerFlow for Result<T> {
    fn into_flow(self) -> Result<Flow> {
        self?.into_flow()
    }
}

/// Why a loop ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The handler asked to stop
    Stopped,
    /// The source closed the subscription
    SourceClosed,
    /// The cancellation token fired
    Cancelled,
}

/// Owns a subscription and releases it when dropped, whatever the exit path
struct SubscriptionGuard<'a, S: EventSource + ?Sized> {
    source: &'a S,
    subscription: Subscription,
}

impl<S: EventSource + ?Sized> Drop for SubscriptionGuard<'_, S> {
    fn drop(&mut self) {
        let id = self.subscription.id();
        self.source.unsubscribe(id);
        debug!("Released subscription {}", id);
    }
}

/// Typed dispatch loop over an [`EventSource`]
///
/// ```rust,no_run
/// use cdp_dispatch::cdp::EventBus;
/// use cdp_dispatch::dispatch::{EventLoop, LoopExit};
/// use cdp_dispatch::proto::page::LoadEventFired;
///
/// # async fn example(bus: EventBus) -> cdp_dispatch::Result<()> {
/// let exit = EventLoop::new(&bus)
///     .run(|e: LoadEventFired| {
///         println!("loaded at {}", e.timestamp);
///         true
///     })
///     .await?;
/// assert_eq!(exit, LoopExit::Stopped);
/// # Ok(())
/// # }
/// ```
pub struct EventLoop<'a, S: EventSource + ?Sized> {
    source: &'a S,
    decode_policy: DecodeFailurePolicy,
    cancel: Option<CancellationToken>,
}

impl<'a, S: EventSource + ?Sized> EventLoop<'a, S> {
    /// Loop over `source` with default settings
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            decode_policy: DecodeFailurePolicy::default(),
            cancel: None,
        }
    }

    /// Set the policy for payloads that fail to decode under a matching tag
    pub fn decode_policy(mut self, policy: DecodeFailurePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Stop waiting as soon as `token` is cancelled
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Subscribe and feed every `E` to `handler` until it asks to stop, the
    /// source closes or the token fires.
    ///
    /// The handler runs inline; the next event is not received before it
    /// returns. The subscription is released on every exit path, including
    /// a panic in the handler or this future being dropped.
    pub async fn run<E, F, R>(self, mut handler: F) -> Result<LoopExit>
    where
        E: Event,
        F: FnMut(E) -> R,
        R: HandlerFlow,
    {
        let mut guard = SubscriptionGuard {
            source: self.source,
            subscription: self.source.subscribe(),
        };
        let id = guard.subscription.id();
        debug!("Dispatching {} on subscription {}", E::METHOD, id);

        let mut filter = EventFilter::<E>::with_policy(self.decode_policy);

        let exit = loop {
            let next = match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    next = guard.subscription.recv() => Some(next),
                },
                None => Some(guard.subscription.recv().await),
            };

            let raw = match next {
                None => break LoopExit::Cancelled,
                Some(None) => break LoopExit::SourceClosed,
                Some(Some(raw)) => raw,
            };

            if !filter.check(&raw)? {
                continue;
            }
            let Some(event) = filter.take() else {
                continue;
            };

            if handler(event).into_flow()? == Flow::Stop {
                break LoopExit::Stopped;
            }
        };

        debug!(
            "Subscription {} for {} ended: {:?} after {} events",
            id,
            E::METHOD,
            exit,
            filter.matched()
        );
        Ok(exit)
    }
}

/// Run a handler for every `E` on `source` until it asks to stop or the source closes
pub async fn each_event<E, S, F, R>(source: &S, handler: F) -> Result<LoopExit>
where
    E: Event,
    S: EventSource + ?Sized,
    F: FnMut(E) -> R,
    R: HandlerFlow,
{
    EventLoop::new(source).run(handler).await
}

/// Like [`each_event`], but also returns once `cancel` fires
pub async fn each_event_until<E, S, F, R>(
    source: &S,
    cancel: &CancellationToken,
    handler: F,
) -> Result<LoopExit>
where
    E: Event,
    S: EventSource + ?Sized,
    F: FnMut(E) -> R,
    R: HandlerFlow,
{
    EventLoop::new(source)
        .cancel_token(cancel.clone())
        .run(handler)
        .await
}
