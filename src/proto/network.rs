//! Network domain events

use super::Event;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP request data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Request URL without fragment
    pub url: String,
    /// HTTP request method
    pub method: String,
    /// HTTP request headers
    #[serde(default)]
    pub headers: HashMap<String, serde_json::Value>,
    /// Whether the request carries POST data
    #[serde(default)]
    pub has_post_data: Option<bool>,
}

/// HTTP response data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response URL
    pub url: String,
    /// HTTP status code
    pub status: i64,
    /// HTTP status text
    #[serde(default)]
    pub status_text: String,
    /// Resource MIME type
    #[serde(default)]
    pub mime_type: String,
    /// HTTP response headers
    #[serde(default)]
    pub headers: HashMap<String, serde_json::Value>,
}

/// Fired when the page is about to send an HTTP request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestWillBeSent {
    /// Request identifier
    pub request_id: String,
    /// Loader identifier
    #[serde(default)]
    pub loader_id: String,
    /// URL of the document this request is loaded for
    #[serde(default, rename = "documentURL")]
    pub document_url: String,
    /// Request data
    pub request: Request,
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
    /// Resource type (Document, Script, XHR, ...)
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    /// Frame identifier
    #[serde(default)]
    pub frame_id: Option<String>,
}

impl Event for RequestWillBeSent {
    const METHOD: &'static str = "Network.requestWillBeSent";
}

/// Fired when an HTTP response is available
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseReceived {
    /// Request identifier
    pub request_id: String,
    /// Loader identifier
    #[serde(default)]
    pub loader_id: String,
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
    /// Resource type
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    /// Response data
    pub response: Response,
    /// Frame identifier
    #[serde(default)]
    pub frame_id: Option<String>,
}

impl Event for ResponseReceived {
    const METHOD: &'static str = "Network.responseReceived";
}

/// Fired when an HTTP request has finished loading
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingFinished {
    /// Request identifier
    pub request_id: String,
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
    /// Total number of bytes received
    pub encoded_data_length: f64,
}

impl Event for LoadingFinished {
    const METHOD: &'static str = "Network.loadingFinished";
}

/// Fired when an HTTP request has failed to load
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingFailed {
    /// Request identifier
    pub request_id: String,
    /// Monotonic timestamp in seconds
    #[serde(default)]
    pub timestamp: f64,
    /// Resource type
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    /// User friendly error message
    #[serde(default)]
    pub error_text: String,
    /// True if loading was canceled
    #[serde(default)]
    pub canceled: Option<bool>,
}

impl Event for LoadingFailed {
    const METHOD: &'static str = "Network.loadingFailed";
}
