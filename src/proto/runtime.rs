//! Runtime domain events

use super::Event;
use serde::{Deserialize, Serialize};

/// Mirror object referencing an original JavaScript object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// Object type
    #[serde(default, rename = "type")]
    pub object_type: String,
    /// Object subtype
    #[serde(default)]
    pub subtype: Option<String>,
    /// Object value
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Object description
    #[serde(default)]
    pub description: Option<String>,
    /// Unserializable value
    #[serde(default)]
    pub unserializable_value: Option<String>,
}

impl RemoteObject {
    /// Best-effort text rendering, the way a console would print it
    pub fn display_text(&self) -> String {
        match (&self.value, &self.unserializable_value, &self.description) {
            (Some(serde_json::Value::String(s)), _, _) => s.clone(),
            (Some(value), _, _) => value.to_string(),
            (None, Some(raw), _) => raw.clone(),
            (None, None, Some(description)) => description.clone(),
            (None, None, None) => self.object_type.clone(),
        }
    }
}

/// Fired when a console API (console.log, console.error, ...) is called
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleApiCalled {
    /// Call type (log, debug, info, error, warning, ...)
    #[serde(rename = "type")]
    pub call_type: String,
    /// Call arguments
    #[serde(default)]
    pub args: Vec<RemoteObject>,
    /// Execution context the call came from
    #[serde(default)]
    pub execution_context_id: i64,
    /// Call timestamp (milliseconds since epoch)
    pub timestamp: f64,
}

impl ConsoleApiCalled {
    /// Arguments rendered and joined with spaces
    pub fn text(&self) -> String {
        self.args
            .iter()
            .map(RemoteObject::display_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Event for ConsoleApiCalled {
    const METHOD: &'static str = "Runtime.consoleAPICalled";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_text() {
        let event: ConsoleApiCalled = serde_json::from_value(serde_json::json!({
            "type": "log",
            "args": [
                {"type": "string", "value": "count"},
                {"type": "number", "value": 3},
                {"type": "number", "unserializableValue": "NaN"},
                {"type": "object", "description": "Window"}
            ],
            "executionContextId": 1,
            "timestamp": 1700000000000.0
        }))
        .unwrap();

        assert_eq!(event.call_type, "log");
        assert_eq!(event.text(), "count 3 NaN Window");
    }
}
