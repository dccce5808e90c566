//! Tag matching and lazy payload decoding

use crate::cdp::CdpEvent;
use crate::error::{Error, Result};
use crate::proto::Event;

/// Decode `raw` as `E` if its method tag names `E`.
///
/// `Ok(None)` is a plain tag mismatch and costs one string comparison; the
/// payload is only parsed on a tag hit. A malformed payload under a matching
/// tag is reported as [`Error::Decode`].
pub fn decode_event<E: Event>(raw: &CdpEvent) -> Result<Option<E>> {
    if raw.method != E::METHOD {
        return Ok(None);
    }

    serde_json::from_slice(&raw.params)
        .map(Some)
        .map_err(|source| Error::decode(E::METHOD, source))
}

/// Load `raw` into `target` when the tags match.
///
/// Returns false on a tag mismatch or a malformed payload; `target` is only
/// written when true is returned.
pub fn event_matches<E: Event>(raw: &CdpEvent, target: &mut E) -> bool {
    match decode_event::<E>(raw) {
        Ok(Some(event)) => {
            *target = event;
            true
        }
        Ok(None) | Err(_) => false,
    }
}
