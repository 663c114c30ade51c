// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Key used by commands that carry a single payload value (`delay`, `log`).
pub const VALUE_KEY: &str = "value";

/// One order-significant message for the controller bridge.
///
/// Serializes flat, the way the bridge expects it:
/// `{"command": "delay", "value": 500}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub command: String,
    #[serde(flatten)]
    pub payload: Map<String, serde_json::Value>,
}

impl Command {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Add the conventional `value` payload entry.
    pub fn with_value(self, value: impl Into<serde_json::Value>) -> Self {
        self.with(VALUE_KEY, value)
    }

    pub fn name(&self) -> &str {
        &self.command
    }

    pub fn value(&self) -> Option<&serde_json::Value> {
        self.payload.get(VALUE_KEY)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = self.payload.clone();
        object.insert("command".to_string(), serde_json::Value::String(self.command.clone()));
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_flat() {
        let cmd = Command::new("delay").with_value(500u64);
        let encoded = serde_json::to_value(&cmd).unwrap();
        assert_eq!(encoded, json!({"command": "delay", "value": 500}));
        assert_eq!(cmd.to_json(), encoded);
    }

    #[test]
    fn test_bare_command_has_no_payload() {
        let cmd = Command::new("connect");
        assert_eq!(serde_json::to_string(&cmd).unwrap(), r#"{"command":"connect"}"#);
        assert!(cmd.value().is_none());
    }

    #[test]
    fn test_deserializes_payload_keys() {
        let cmd: Command = serde_json::from_str(r#"{"command":"log","value":"x"}"#).unwrap();
        assert_eq!(cmd.name(), "log");
        assert_eq!(cmd.value(), Some(&json!("x")));
    }
}
