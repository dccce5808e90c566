//! Page domain events

use super::Event;
use serde::{Deserialize, Serialize};

/// Fired when the page `load` event fires
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadEventFired {
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
}

impl Event for LoadEventFired {
    const METHOD: &'static str = "Page.loadEventFired";
}

/// Fired when the page `DOMContentLoaded` event fires
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomContentEventFired {
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
}

impl Event for DomContentEventFired {
    const METHOD: &'static str = "Page.domContentEventFired";
}

/// Frame description carried by navigation events
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Frame ID
    pub id: String,
    /// Parent frame ID, absent for the main frame
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Loader ID of the current document
    #[serde(default)]
    pub loader_id: String,
    /// Frame document URL without fragment
    pub url: String,
    /// Frame document's security origin
    #[serde(default)]
    pub security_origin: String,
    /// MIME type of the frame document
    #[serde(default)]
    pub mime_type: String,
}

impl Frame {
    /// Whether this is a top-level frame
    pub fn is_main(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Fired once navigation of a frame has completed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameNavigated {
    /// Frame object
    pub frame: Frame,
}

impl Event for FrameNavigated {
    const METHOD: &'static str = "Page.frameNavigated";
}
