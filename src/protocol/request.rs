//! Command and response envelope types.
//!
//! Defines the JSON message format exchanged with the browser's DevTools
//! endpoint: outgoing commands correlated by integer id, incoming responses
//! carrying either a `result` or an `error` object.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::{CommandId, SessionId};

use super::Command;

// ============================================================================
// Request
// ============================================================================

/// A command sent to the browser.
///
/// # Format
///
/// ```json
/// {
///   "id": 12,
///   "method": "Domain.methodName",
///   "params": { ... },
///   "sessionId": "8DEF..."
/// }
/// ```
///
/// `sessionId` is present only for commands scoped to an attached page;
/// browser-level commands (target management, version, shutdown) omit it.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Unique identifier for command/response correlation.
    pub id: CommandId,

    /// Page session this command is scoped to, if any.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    /// Command with method and params.
    #[serde(flatten)]
    pub command: Command,
}

impl Request {
    /// Creates a browser-level request with auto-generated id.
    #[inline]
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            id: CommandId::next(),
            session_id: None,
            command,
        }
    }

    /// Creates a session-scoped request with auto-generated id.
    #[inline]
    #[must_use]
    pub fn for_session(session_id: SessionId, command: Command) -> Self {
        Self {
            id: CommandId::next(),
            session_id: Some(session_id),
            command,
        }
    }

    /// Creates a request with a specific id.
    #[inline]
    #[must_use]
    pub fn with_id(id: CommandId, session_id: Option<SessionId>, command: Command) -> Self {
        Self {
            id,
            session_id,
            command,
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// A response from the browser.
///
/// # Format
///
/// Success:
/// ```json
/// {
///   "id": 12,
///   "result": { ... }
/// }
/// ```
///
/// Error:
/// ```json
/// {
///   "id": 12,
///   "error": { "code": -32601, "message": "'Page.navigat' wasn't found" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Matches the command `id`.
    pub id: CommandId,

    /// Session the response belongs to, if command was session-scoped.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<SessionId>,

    /// Result data (if success).
    #[serde(default)]
    pub result: Option<Value>,

    /// Error payload (if error).
    #[serde(default)]
    pub error: Option<ResponseError>,
}

/// Error payload inside an error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseError {
    /// Protocol error code.
    pub code: i64,

    /// Human-readable error message.
    pub message: String,

    /// Additional error detail, when the browser provides one.
    #[serde(default)]
    pub data: Option<String>,
}

impl Response {
    /// Returns `true` if this is a success response.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns `true` if this is an error response.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the response unchanged if it is a success, or converts the
    /// error payload into [`Error::Cdp`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cdp`] if the response carries an error payload.
    pub fn check(self) -> Result<Self> {
        match self.error {
            None => Ok(self),
            Some(err) => {
                let message = match err.data {
                    Some(data) => format!("{} ({data})", err.message),
                    None => err.message,
                };
                Err(Error::cdp(err.code, message))
            }
        }
    }

    /// Extracts the result value, returning the error if the browser
    /// rejected the command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cdp`] if the response carries an error payload.
    pub fn into_result(self) -> Result<Value> {
        let checked = self.check()?;
        Ok(checked.result.unwrap_or(Value::Null))
    }

    /// Gets a string value from the result.
    ///
    /// Returns empty string if key not found or not a string.
    #[inline]
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.result
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets a u64 value from the result.
    ///
    /// Returns 0 if key not found or not a number.
    #[inline]
    #[must_use]
    pub fn get_u64(&self, key: &str) -> u64 {
        self.result
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_u64())
            .unwrap_or_default()
    }

    /// Gets a boolean value from the result.
    ///
    /// Returns false if key not found or not a boolean.
    #[inline]
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.result
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_bool())
            .unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PageCommand;

    #[test]
    fn test_request_serialization() {
        let command = Command::Page(PageCommand::Navigate {
            url: "https://example.com".to_string(),
        });

        let request = Request::for_session(SessionId::new("AB12"), command);
        let json = serde_json::to_string(&request).expect("serialize");

        assert!(json.contains("\"method\":\"Page.navigate\""));
        assert!(json.contains("\"sessionId\":\"AB12\""));
        assert!(json.contains("https://example.com"));
    }

    #[test]
    fn test_browser_level_request_omits_session() {
        let request = Request::new(Command::Browser(crate::protocol::BrowserCommand::GetVersion));
        let json = serde_json::to_string(&request).expect("serialize");

        assert!(json.contains("\"method\":\"Browser.getVersion\""));
        assert!(!json.contains("sessionId"));
    }

    #[test]
    fn test_request_with_id() {
        let id = CommandId::next();
        let command = Command::Page(PageCommand::Enable);

        let request = Request::with_id(id, None, command);
        assert_eq!(request.id, id);
    }

    #[test]
    fn test_success_response() {
        let json_str = r#"{
            "id": 4,
            "result": {"frameId": "F1"}
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        assert!(response.is_success());
        assert!(!response.is_error());
        assert_eq!(response.get_string("frameId"), "F1");
    }

    #[test]
    fn test_error_response() {
        let json_str = r#"{
            "id": 4,
            "error": {"code": -32000, "message": "Not allowed"}
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        assert!(response.is_error());
        assert!(!response.is_success());
    }

    #[test]
    fn test_into_result_success() {
        let json_str = r#"{
            "id": 9,
            "result": {"value": 42}
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        let result = response.into_result().expect("should succeed");
        assert_eq!(result.get("value").and_then(|v| v.as_u64()), Some(42));
    }

    #[test]
    fn test_into_result_error() {
        let json_str = r#"{
            "id": 9,
            "error": {"code": -32601, "message": "'Page.navigat' wasn't found"}
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        let result = response.into_result();
        assert!(matches!(result, Err(Error::Cdp { code: -32601, .. })));
    }

    #[test]
    fn test_response_get_helpers() {
        let json_str = r#"{
            "id": 2,
            "result": {
                "product": "Chrome/120.0.6099.109",
                "count": 42,
                "enabled": true
            }
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        assert_eq!(response.get_string("product"), "Chrome/120.0.6099.109");
        assert_eq!(response.get_u64("count"), 42);
        assert!(response.get_bool("enabled"));

        // Missing keys return defaults
        assert_eq!(response.get_string("missing"), "");
        assert_eq!(response.get_u64("missing"), 0);
        assert!(!response.get_bool("missing"));
    }
}
