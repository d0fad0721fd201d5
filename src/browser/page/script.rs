//! JavaScript execution methods.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{Command, PageCommand, RuntimeCommand};

use super::Page;

// ============================================================================
// Page - Script Execution
// ============================================================================

impl Page {
    /// Evaluates a JavaScript expression in the page context.
    ///
    /// The result is serialized by value; expressions evaluating to
    /// non-serializable objects come back as `null`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title = page.evaluate("document.title").await?;
    /// ```
    pub async fn evaluate(&self, expression: &str) -> Result<Value> {
        debug!(target_id = %self.inner.target_id, script_len = expression.len(), "Evaluating script");

        let command = Command::Runtime(RuntimeCommand::Evaluate {
            expression: expression.to_string(),
            return_by_value: true,
            await_promise: false,
            user_gesture: false,
        });

        let response = self.send_command(command).await?;
        let value = extract_value(response.result.as_ref())?;

        debug!(target_id = %self.inner.target_id, "Script evaluated");
        Ok(value)
    }

    /// Evaluates a JavaScript expression that returns a promise, resolving
    /// it before returning.
    ///
    /// Runs with a user gesture so the page treats resulting clicks and
    /// scrolls as user-initiated.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let texts = page
    ///     .evaluate_async("new Promise((resolve) => setTimeout(() => resolve(1), 100))")
    ///     .await?;
    /// ```
    pub async fn evaluate_async(&self, expression: &str) -> Result<Value> {
        debug!(target_id = %self.inner.target_id, script_len = expression.len(), "Evaluating async script");

        let command = Command::Runtime(RuntimeCommand::Evaluate {
            expression: expression.to_string(),
            return_by_value: true,
            await_promise: true,
            user_gesture: true,
        });

        let response = self.send_command(command).await?;
        let value = extract_value(response.result.as_ref())?;

        debug!(target_id = %self.inner.target_id, "Async script evaluated");
        Ok(value)
    }

    /// Like [`evaluate_async`](Self::evaluate_async) with a custom
    /// response timeout.
    ///
    /// Long-running page scripts (incremental scrolls, staggered click
    /// sequences) can outlive the default command timeout.
    pub(crate) async fn evaluate_async_with_timeout(
        &self,
        expression: &str,
        timeout: Duration,
    ) -> Result<Value> {
        debug!(
            target_id = %self.inner.target_id,
            script_len = expression.len(),
            timeout_ms = timeout.as_millis() as u64,
            "Evaluating async script"
        );

        let command = Command::Runtime(RuntimeCommand::Evaluate {
            expression: expression.to_string(),
            return_by_value: true,
            await_promise: true,
            user_gesture: true,
        });

        let response = self.send_command_with_timeout(command, timeout).await?;
        let value = extract_value(response.result.as_ref())?;

        debug!(target_id = %self.inner.target_id, "Async script evaluated");
        Ok(value)
    }

    /// Registers a script evaluated in every new document before the
    /// page's own scripts run.
    ///
    /// Used to conceal automation markers (`navigator.webdriver`) before
    /// detection scripts can observe them.
    pub async fn add_init_script(&self, source: &str) -> Result<()> {
        debug!(target_id = %self.inner.target_id, script_len = source.len(), "Adding init script");

        let command = Command::Page(PageCommand::AddScriptToEvaluateOnNewDocument {
            source: source.to_string(),
        });
        self.send_command(command).await?;
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extracts the evaluation value from a `Runtime.evaluate` result,
/// surfacing thrown exceptions as [`Error::ScriptException`].
fn extract_value(result: Option<&Value>) -> Result<Value> {
    let result = match result {
        Some(result) => result,
        None => return Ok(Value::Null),
    };

    if let Some(details) = result.get("exceptionDetails") {
        let message = details
            .get("exception")
            .and_then(|e| e.get("description"))
            .and_then(|d| d.as_str())
            .or_else(|| details.get("text").and_then(|t| t.as_str()))
            .unwrap_or("Unknown script exception");
        return Err(Error::script_exception(message));
    }

    Ok(result
        .get("result")
        .and_then(|r| r.get("value"))
        .cloned()
        .unwrap_or(Value::Null))
}

/// Escapes a string for safe use in JavaScript.
pub(crate) fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_value_returns_value() {
        let result = json!({ "result": { "type": "string", "value": "hello" } });
        let value = extract_value(Some(&result)).unwrap();
        assert_eq!(value, json!("hello"));
    }

    #[test]
    fn test_extract_value_null_when_missing() {
        let result = json!({ "result": { "type": "undefined" } });
        let value = extract_value(Some(&result)).unwrap();
        assert!(value.is_null());

        assert!(extract_value(None).unwrap().is_null());
    }

    #[test]
    fn test_extract_value_surfaces_exception() {
        let result = json!({
            "result": { "type": "object", "subtype": "error" },
            "exceptionDetails": {
                "text": "Uncaught",
                "exception": {
                    "type": "object",
                    "subtype": "error",
                    "description": "ReferenceError: nope is not defined"
                }
            }
        });
        let err = extract_value(Some(&result)).unwrap_err();
        assert!(err.to_string().contains("ReferenceError"));
    }

    #[test]
    fn test_extract_value_falls_back_to_text() {
        let result = json!({
            "exceptionDetails": { "text": "Promise was rejected" }
        });
        let err = extract_value(Some(&result)).unwrap_err();
        assert!(err.to_string().contains("Promise was rejected"));
    }

    #[test]
    fn test_json_string_escapes() {
        assert_eq!(json_string("plain"), "\"plain\"");
        assert_eq!(json_string("with \"quotes\""), "\"with \\\"quotes\\\"\"");
        assert_eq!(json_string("line\nbreak"), "\"line\\nbreak\"");
    }
}
