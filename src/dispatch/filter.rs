//! Reusable event filters bound to one decode target

use super::matcher::decode_event;
use crate::cdp::CdpEvent;
use crate::error::{Error, Result};
use crate::proto::Event;
use serde::Deserialize;
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::debug;

/// What to do with a payload that fails to decode under a matching tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeFailurePolicy {
    /// Treat it like a mismatch and keep going
    #[default]
    Skip,
    /// Report [`Error::Decode`] to the caller
    Fail,
}

impl FromStr for DecodeFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(DecodeFailurePolicy::Skip),
            "fail" => Ok(DecodeFailurePolicy::Fail),
            other => Err(Error::configuration(format!(
                "Unknown decode failure policy '{}', expected 'skip' or 'fail'",
                other
            ))),
        }
    }
}

/// Stateful predicate over raw events for one event kind.
///
/// Each successful [`check`](EventFilter::check) overwrites the bound event.
/// The bound event is only observable while the latest check was a hit, so
/// a value from an earlier match cannot be mistaken for the current event.
#[derive(Debug)]
pub struct EventFilter<E: Event> {
    event: Option<E>,
    fresh: bool,
    policy: DecodeFailurePolicy,
    matched: u64,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Event> EventFilter<E> {
    /// Filter that skips malformed payloads
    pub fn new() -> Self {
        Self::with_policy(DecodeFailurePolicy::default())
    }

    /// Filter with an explicit decode failure policy
    pub fn with_policy(policy: DecodeFailurePolicy) -> Self {
        Self {
            event: None,
            fresh: false,
            policy,
            matched: 0,
            _kind: PhantomData,
        }
    }

    /// Test a raw event, loading it into the bound event on a hit
    pub fn check(&mut self, raw: &CdpEvent) -> Result<bool> {
        self.fresh = false;

        match decode_event::<E>(raw) {
            Ok(Some(event)) => {
                self.event = Some(event);
                self.fresh = true;
                self.matched += 1;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => match self.policy {
                DecodeFailurePolicy::Skip => {
                    debug!("Skipping undecodable {} event: {}", E::METHOD, err);
                    Ok(false)
                }
                DecodeFailurePolicy::Fail => Err(err),
            },
        }
    }

    /// The event loaded by the latest check, if that check was a hit
    pub fn event(&self) -> Option<&E> {
        if self.fresh {
            self.event.as_ref()
        } else {
            None
        }
    }

    /// Move the event loaded by the latest check out of the filter
    pub fn take(&mut self) -> Option<E> {
        if !self.fresh {
            return None;
        }
        self.fresh = false;
        self.event.take()
    }

    /// Number of hits so far
    pub fn matched(&self) -> u64 {
        self.matched
    }

    /// Decode failure policy in effect
    pub fn policy(&self) -> DecodeFailurePolicy {
        self.policy
    }
}

impl<E: Event> Default for EventFilter<E> {
    fn default() -> Self {
        Self::new()
    }
}
