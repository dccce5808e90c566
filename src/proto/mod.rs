//! # Typed CDP events
//!
//! Each event kind is a plain serde struct that knows its own method tag.
//! [`AnyEvent`] closes the set of kinds this crate knows about so a raw
//! event can be decoded by tag without naming the type up front.

pub mod network;
pub mod page;
pub mod runtime;

use crate::cdp::CdpEvent;
use crate::dispatch::decode_event;
use crate::error::Result;
use serde::de::DeserializeOwned;

/// A typed CDP event
pub trait Event: DeserializeOwned + Send + 'static {
    /// CDP method tag (e.g., "Network.requestWillBeSent")
    const METHOD: &'static str;

    /// Method tag of this value's kind
    fn method_name(&self) -> &'static str {
        Self::METHOD
    }
}

/// Every event kind known to this crate
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEvent {
    /// Page.loadEventFired
    LoadEventFired(page::LoadEventFired),
    /// Page.domContentEventFired
    DomContentEventFired(page::DomContentEventFired),
    /// Page.frameNavigated
    FrameNavigated(page::FrameNavigated),
    /// Network.requestWillBeSent
    RequestWillBeSent(network::RequestWillBeSent),
    /// Network.responseReceived
    ResponseReceived(network::ResponseReceived),
    /// Network.loadingFinished
    LoadingFinished(network::LoadingFinished),
    /// Network.loadingFailed
    LoadingFailed(network::LoadingFailed),
    /// Runtime.consoleAPICalled
    ConsoleApiCalled(runtime::ConsoleApiCalled),
}

impl AnyEvent {
    /// Decode a raw event into its known kind.
    ///
    /// `Ok(None)` means the tag names no known kind.
    pub fn decode(raw: &CdpEvent) -> Result<Option<AnyEvent>> {
        fn wrap<E: Event>(raw: &CdpEvent, variant: fn(E) -> AnyEvent) -> Result<Option<AnyEvent>> {
            Ok(decode_event::<E>(raw)?.map(variant))
        }

        match raw.method.as_str() {
            m if m == page::LoadEventFired::METHOD => wrap(raw, AnyEvent::LoadEventFired),
            m if m == page::DomContentEventFired::METHOD => wrap(raw, AnyEvent::DomContentEventFired),
            m if m == page::FrameNavigated::METHOD => wrap(raw, AnyEvent::FrameNavigated),
            m if m == network::RequestWillBeSent::METHOD => wrap(raw, AnyEvent::RequestWillBeSent),
            m if m == network::ResponseReceived::METHOD => wrap(raw, AnyEvent::ResponseReceived),
            m if m == network::LoadingFinished::METHOD => wrap(raw, AnyEvent::LoadingFinished),
            m if m == network::LoadingFailed::METHOD => wrap(raw, AnyEvent::LoadingFailed),
            m if m == runtime::ConsoleApiCalled::METHOD => wrap(raw, AnyEvent::ConsoleApiCalled),
            _ => Ok(None),
        }
    }

    /// Method tag of the wrapped event
    pub fn method_name(&self) -> &'static str {
        match self {
            AnyEvent::LoadEventFired(e) => e.method_name(),
            AnyEvent::DomContentEventFired(e) => e.method_name(),
            AnyEvent::FrameNavigated(e) => e.method_name(),
            AnyEvent::RequestWillBeSent(e) => e.method_name(),
            AnyEvent::ResponseReceived(e) => e.method_name(),
            AnyEvent::LoadingFinished(e) => e.method_name(),
            AnyEvent::LoadingFailed(e) => e.method_name(),
            AnyEvent::ConsoleApiCalled(e) => e.method_name(),
        }
    }
}
