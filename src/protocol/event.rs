//! Event message types.
//!
//! Events are unsolicited notifications pushed by the browser over the
//! DevTools connection whenever page or target activity occurs. Unlike
//! command responses they carry no `id`; correlation is by method name
//! and, for attached targets, by `sessionId`.
//!
//! # Event Types
//!
//! | Domain | Events |
//! |--------|--------|
//! | `Page` | `domContentEventFired`, `loadEventFired` |
//! | `Target` | `detachedFromTarget` |
//! | `Inspector` | `detached` |

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::identifiers::SessionId;

// ============================================================================
// Event
// ============================================================================

/// An event notification pushed by the browser.
///
/// # Format
///
/// ```json
/// {
///   "method": "Page.loadEventFired",
///   "params": { "timestamp": 4117.561 },
///   "sessionId": "8D6C2F1AC2D9C1B6E2E3F0A1B2C3D4E5"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event name in `Domain.eventName` format.
    pub method: String,

    /// Event-specific data.
    #[serde(default)]
    pub params: Value,

    /// Session the event originated from.
    ///
    /// Absent for events raised on the browser-level connection itself.
    #[serde(rename = "sessionId")]
    pub session_id: Option<SessionId>,
}

impl Event {
    /// Method name of the `Page.domContentEventFired` event.
    pub const DOM_CONTENT_EVENT_FIRED: &'static str = "Page.domContentEventFired";

    /// Method name of the `Page.loadEventFired` event.
    pub const LOAD_EVENT_FIRED: &'static str = "Page.loadEventFired";

    /// Method name of the `Target.detachedFromTarget` event.
    pub const DETACHED_FROM_TARGET: &'static str = "Target.detachedFromTarget";

    /// Method name of the `Inspector.detached` event.
    pub const INSPECTOR_DETACHED: &'static str = "Inspector.detached";

    /// Returns the domain name from the method.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let event = Event { method: "Page.loadEventFired".into(), .. };
    /// assert_eq!(event.domain(), "Page");
    /// ```
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &str {
        self.method.split('.').next().unwrap_or_default()
    }

    /// Returns the event name from the method.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let event = Event { method: "Page.loadEventFired".into(), .. };
    /// assert_eq!(event.event_name(), "loadEventFired");
    /// ```
    #[inline]
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.method.split('.').nth(1).unwrap_or_default()
    }

    /// Returns true when the event belongs to the given session.
    #[inline]
    #[must_use]
    pub fn is_for_session(&self, session_id: &SessionId) -> bool {
        self.session_id.as_ref() == Some(session_id)
    }

    /// Parses the event into a typed variant.
    #[must_use]
    pub fn parse(&self) -> ParsedEvent {
        self.parse_internal()
    }
}

// ============================================================================
// ParsedEvent
// ============================================================================

/// Parsed event types for type-safe handling.
#[derive(Debug, Clone)]
pub enum ParsedEvent {
    /// `DOMContentLoaded` fired in the page.
    DomContentEventFired {
        /// Monotonic timestamp in seconds.
        timestamp: f64,
    },

    /// The page `load` event fired.
    LoadEventFired {
        /// Monotonic timestamp in seconds.
        timestamp: f64,
    },

    /// A session was detached from its target.
    DetachedFromTarget {
        /// Detached session ID.
        session_id: String,
        /// Target the session was attached to.
        target_id: String,
    },

    /// The inspected target went away (closed, crashed, or navigated
    /// out of the debuggable process).
    InspectorDetached {
        /// Browser-supplied reason string.
        reason: String,
    },

    /// Any event this crate does not model.
    Unknown {
        /// Event method.
        method: String,
        /// Event params.
        params: Value,
    },
}

// ============================================================================
// Event Parsing Implementation
// ============================================================================

impl Event {
    /// Internal parsing implementation.
    fn parse_internal(&self) -> ParsedEvent {
        match self.method.as_str() {
            Self::DOM_CONTENT_EVENT_FIRED => ParsedEvent::DomContentEventFired {
                timestamp: self.get_f64("timestamp"),
            },

            Self::LOAD_EVENT_FIRED => ParsedEvent::LoadEventFired {
                timestamp: self.get_f64("timestamp"),
            },

            Self::DETACHED_FROM_TARGET => ParsedEvent::DetachedFromTarget {
                session_id: self.get_string("sessionId"),
                target_id: self.get_string("targetId"),
            },

            Self::INSPECTOR_DETACHED => ParsedEvent::InspectorDetached {
                reason: self.get_string("reason"),
            },

            _ => ParsedEvent::Unknown {
                method: self.method.clone(),
                params: self.params.clone(),
            },
        }
    }

    /// Gets a string from params.
    #[inline]
    fn get_string(&self, key: &str) -> String {
        self.params
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets an f64 from params.
    #[inline]
    fn get_f64(&self, key: &str) -> f64 {
        self.params
            .get(key)
            .and_then(|v| v.as_f64())
            .unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_event_parsing() {
        let json_str = r#"{
            "method": "Page.loadEventFired",
            "params": { "timestamp": 4117.561 },
            "sessionId": "8D6C2F1AC2D9C1B6E2E3F0A1B2C3D4E5"
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert_eq!(event.domain(), "Page");
        assert_eq!(event.event_name(), "loadEventFired");
        assert!(event.session_id.is_some());

        match event.parse() {
            ParsedEvent::LoadEventFired { timestamp } => {
                assert!((timestamp - 4117.561).abs() < 1e-9);
            }
            _ => panic!("unexpected parsed event type"),
        }
    }

    #[test]
    fn test_dom_content_event_parsing() {
        let json_str = r#"{
            "method": "Page.domContentEventFired",
            "params": { "timestamp": 4117.102 }
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert!(event.session_id.is_none());

        match event.parse() {
            ParsedEvent::DomContentEventFired { timestamp } => {
                assert!(timestamp > 0.0);
            }
            _ => panic!("unexpected parsed event type"),
        }
    }

    #[test]
    fn test_detached_from_target_parsing() {
        let json_str = r#"{
            "method": "Target.detachedFromTarget",
            "params": {
                "sessionId": "8D6C2F1AC2D9C1B6E2E3F0A1B2C3D4E5",
                "targetId": "F86E9D2B3C4A5D6E7F8091A2B3C4D5E6"
            }
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");

        match event.parse() {
            ParsedEvent::DetachedFromTarget {
                session_id,
                target_id,
            } => {
                assert_eq!(session_id, "8D6C2F1AC2D9C1B6E2E3F0A1B2C3D4E5");
                assert_eq!(target_id, "F86E9D2B3C4A5D6E7F8091A2B3C4D5E6");
            }
            _ => panic!("unexpected parsed event type"),
        }
    }

    #[test]
    fn test_inspector_detached_parsing() {
        let json_str = r#"{
            "method": "Inspector.detached",
            "params": { "reason": "target_closed" },
            "sessionId": "8D6C2F1AC2D9C1B6E2E3F0A1B2C3D4E5"
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");

        match event.parse() {
            ParsedEvent::InspectorDetached { reason } => {
                assert_eq!(reason, "target_closed");
            }
            _ => panic!("expected InspectorDetached variant"),
        }
    }

    #[test]
    fn test_unknown_event() {
        let json_str = r#"{
            "method": "Network.requestWillBeSent",
            "params": { "requestId": "1000.2" }
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");

        match event.parse() {
            ParsedEvent::Unknown { method, .. } => {
                assert_eq!(method, "Network.requestWillBeSent");
            }
            _ => panic!("expected Unknown variant"),
        }
    }

    #[test]
    fn test_event_without_params() {
        let json_str = r#"{ "method": "Page.frameResized" }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert!(event.params.is_null());
        assert_eq!(event.domain(), "Page");
    }

    #[test]
    fn test_is_for_session() {
        let session = SessionId::new("AAA");
        let other = SessionId::new("BBB");

        let event = Event {
            method: Event::LOAD_EVENT_FIRED.to_string(),
            params: Value::Null,
            session_id: Some(session.clone()),
        };

        assert!(event.is_for_session(&session));
        assert!(!event.is_for_session(&other));
    }
}
