//! CDP (Chrome DevTools Protocol) wire frame definitions
//!
//! Only the server -> client side is modelled: responses are classified so
//! they can be told apart from notifications, notifications become
//! [`CdpEvent`]s.

use super::traits::CdpEvent;
use crate::error::{Error, Result};
use bytes::Bytes;
use serde::Deserialize;

/// CDP JSON-RPC notification (event)
#[derive(Debug, Clone, Deserialize)]
pub struct CdpNotification {
    /// Event method (e.g., "Page.loadEventFired")
    pub method: String,
    /// Event parameters
    #[serde(default)]
    pub params: serde_json::Value,
    /// Session ID for multi-session targets
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct CdpRpcResponse {
    /// Response ID (matches request ID)
    pub id: u64,
    /// Response result
    #[serde(default)]
    pub result: serde_json::Value,
    /// Error if any
    #[serde(default)]
    pub error: Option<CdpErrorDetail>,
    /// Session ID for multi-session targets
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

impl CdpRpcResponse {
    /// Turn the response into its result, or the protocol error it carries
    pub fn into_result(self) -> Result<serde_json::Value> {
        match self.error {
            Some(error) => Err(Error::protocol(error.code, error.message)),
            None => Ok(self.result),
        }
    }
}

/// CDP error detail
#[derive(Debug, Clone, Deserialize)]
pub struct CdpErrorDetail {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Additional error data
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Incoming CDP message
#[derive(Debug, Clone)]
pub enum CdpMessage {
    /// Response to a command (server -> client)
    Response(CdpRpcResponse),
    /// Notification/Event (server -> client)
    Notification(CdpNotification),
}

impl CdpMessage {
    /// Classify a text frame.
    ///
    /// Frames carrying an `id` are responses, everything else must be a
    /// notification with a `method`.
    pub fn parse(text: &str) -> Result<Self> {
        if let Ok(response) = serde_json::from_str::<CdpRpcResponse>(text) {
            return Ok(CdpMessage::Response(response));
        }

        let notification = serde_json::from_str::<CdpNotification>(text)?;
        Ok(CdpMessage::Notification(notification))
    }
}

impl CdpEvent {
    /// Build a raw event from a parsed notification.
    ///
    /// A missing or `null` params object becomes `{}` so that parameterless
    /// events still decode into empty structs.
    pub fn from_notification(notification: CdpNotification) -> Result<Self> {
        let params = if notification.params.is_null() {
            Bytes::from_static(b"{}")
        } else {
            Bytes::from(serde_json::to_vec(&notification.params)?)
        };

        Ok(CdpEvent {
            method: notification.method,
            params,
            session_id: notification.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notification() {
        let text = r#"{"method":"Page.loadEventFired","params":{"timestamp":12.5},"sessionId":"S1"}"#;

        match CdpMessage::parse(text).unwrap() {
            CdpMessage::Notification(n) => {
                assert_eq!(n.method, "Page.loadEventFired");
                assert_eq!(n.session_id.as_deref(), Some("S1"));
                assert_eq!(n.params["timestamp"], 12.5);
            }
            other => panic!("Expected notification, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_response() {
        let text = r#"{"id":7,"error":{"code":-32000,"message":"Cannot find context with specified id"}}"#;

        let CdpMessage::Response(response) = CdpMessage::parse(text).unwrap() else {
            panic!("Expected response");
        };
        assert_eq!(response.id, 7);

        let err = response.into_result().unwrap_err();
        assert!(err.is_nil_context());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            CdpMessage::parse("{\"foo\":1}"),
            Err(Error::Serialization(_))
        ));
        assert!(CdpMessage::parse("not json").is_err());
    }

    #[test]
    fn test_missing_params_become_empty_object() {
        let notification: CdpNotification =
            serde_json::from_str(r#"{"method":"Page.interstitialShown"}"#).unwrap();
        let event = CdpEvent::from_notification(notification).unwrap();

        assert_eq!(event.method, "Page.interstitialShown");
        assert_eq!(&event.params[..], b"{}");
        assert!(event.session_id.is_none());
    }
}
