//! DOM query and manipulation methods.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::Result;

use super::Page;
use super::script::json_string;

// ============================================================================
// Constants
// ============================================================================

/// Poll cadence for [`Page::wait_for_selector`].
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long the page waits after scheduling candidate clicks before
/// reporting what was clicked. Gives the page time to react.
const CLICK_SETTLE_MS: u64 = 2000;

/// Delay between scrolling a candidate into view and clicking it.
const CLICK_DELAY_MS: u64 = 100;

// ============================================================================
// Page - Element Queries
// ============================================================================

impl Page {
    /// Returns true when at least one element matches the selector.
    pub async fn query_exists(&self, selector: &str) -> Result<bool> {
        let script = format!(
            "document.querySelector({}) !== null",
            json_string(selector)
        );
        let result = self.evaluate(&script).await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Waits for an element matching the selector to appear.
    ///
    /// Polls every 100 ms up to the given deadline. Returns `true` if the
    /// element appeared and `false` on timeout; transport failures are
    /// errors.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use std::time::Duration;
    ///
    /// if page.wait_for_selector("#banner", Duration::from_secs(5)).await? {
    ///     page.click_first("#banner button").await?;
    /// }
    /// ```
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout_duration: Duration,
    ) -> Result<bool> {
        debug!(
            target_id = %self.inner.target_id,
            selector = %selector,
            timeout_ms = timeout_duration.as_millis() as u64,
            "Waiting for selector"
        );

        let deadline = Instant::now() + timeout_duration;
        loop {
            if self.query_exists(selector).await? {
                debug!(selector = %selector, "Selector appeared");
                return Ok(true);
            }
            if Instant::now() >= deadline {
                debug!(selector = %selector, "Selector wait timed out");
                return Ok(false);
            }
            sleep(WAIT_POLL_INTERVAL).await;
        }
    }
}

// ============================================================================
// Page - Element Actions
// ============================================================================

impl Page {
    /// Clicks the first element matching the selector.
    ///
    /// Returns `true` if an element was found and clicked.
    pub async fn click_first(&self, selector: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
    const el = document.querySelector({});
    if (el) {{ el.click(); return true; }}
    return false;
}})()"#,
            json_string(selector)
        );
        let result = self.evaluate(&script).await?;
        let clicked = result.as_bool().unwrap_or(false);
        debug!(target_id = %self.inner.target_id, selector = %selector, clicked, "Click first match");
        Ok(clicked)
    }

    /// Removes the first element matching the selector from the DOM.
    ///
    /// Returns `true` if an element was removed.
    pub async fn remove_first(&self, selector: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
    const el = document.querySelector({});
    if (el) {{ el.remove(); return true; }}
    return false;
}})()"#,
            json_string(selector)
        );
        let result = self.evaluate(&script).await?;
        let removed = result.as_bool().unwrap_or(false);
        debug!(target_id = %self.inner.target_id, selector = %selector, removed, "Remove first match");
        Ok(removed)
    }

    /// Removes every element matching the selector from the DOM.
    ///
    /// Returns the number of elements removed.
    pub async fn remove_all(&self, selector: &str) -> Result<u64> {
        let script = format!(
            r#"(() => {{
    const elements = document.querySelectorAll({});
    elements.forEach((el) => el.remove());
    return elements.length;
}})()"#,
            json_string(selector)
        );
        let result = self.evaluate(&script).await?;
        let removed = result.as_u64().unwrap_or(0);
        debug!(target_id = %self.inner.target_id, selector = %selector, removed, "Removed matches");
        Ok(removed)
    }

    /// Hides every `span` whose text contains the needle.
    ///
    /// Returns the number of spans hidden. Used to blank out controls that
    /// should not appear in the printed output.
    pub async fn hide_spans_containing(&self, needle: &str) -> Result<u64> {
        let script = format!(
            r#"(() => {{
    const spans = document.querySelectorAll("span");
    let hidden = 0;
    for (const el of spans) {{
        const text = el.textContent || el.innerText || "";
        if (text.includes({})) {{
            el.style.display = "none";
            hidden++;
        }}
    }}
    return hidden;
}})()"#,
            json_string(needle)
        );
        let result = self.evaluate(&script).await?;
        let hidden = result.as_u64().unwrap_or(0);
        debug!(target_id = %self.inner.target_id, needle = %needle, hidden, "Hid matching spans");
        Ok(hidden)
    }
}

// ============================================================================
// Page - Expansion Candidates
// ============================================================================

impl Page {
    /// Collects the trimmed text of every element matching the selector.
    ///
    /// The matched nodes are stashed on the page so a later
    /// [`click_candidates`](Self::click_candidates) can address them by
    /// index even after the DOM grows around them.
    pub async fn collect_candidates(&self, selector: &str) -> Result<Vec<String>> {
        let script = candidate_collection_script(selector);
        let result = self.evaluate(&script).await?;

        let texts: Vec<String> = result
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            target_id = %self.inner.target_id,
            selector = %selector,
            count = texts.len(),
            "Collected candidates"
        );
        Ok(texts)
    }

    /// Clicks previously collected candidates by index.
    ///
    /// Each chosen node is scrolled into view, then clicked shortly after;
    /// the call resolves once the page has had time to react. Nodes that
    /// left the DOM since collection are skipped. Returns the texts of the
    /// elements actually clicked.
    pub async fn click_candidates(&self, indices: &[usize]) -> Result<Vec<String>> {
        if indices.is_empty() {
            return Ok(Vec::new());
        }

        let script = indexed_click_script(indices);
        let result = self.evaluate_async(&script).await?;

        let clicked: Vec<String> = result
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            target_id = %self.inner.target_id,
            requested = indices.len(),
            clicked = clicked.len(),
            "Clicked candidates"
        );
        Ok(clicked)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the script that stashes matching nodes and returns their texts.
fn candidate_collection_script(selector: &str) -> String {
    format!(
        r#"(() => {{
    const elements = Array.from(document.querySelectorAll({}));
    window.__expandCandidates = elements;
    return elements.map((el) => (el.textContent || el.innerText || "").trim());
}})()"#,
        json_string(selector)
    )
}

/// Builds the script that clicks stashed nodes by index.
fn indexed_click_script(indices: &[usize]) -> String {
    let indices_json = serde_json::to_string(indices).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"(() => {{
    const candidates = window.__expandCandidates || [];
    const indices = {indices_json};
    const clicked = [];
    for (const i of indices) {{
        const el = candidates[i];
        if (!el || !el.isConnected) continue;
        try {{
            el.scrollIntoView({{ behavior: "smooth", block: "center" }});
            setTimeout(() => {{
                el.click();
                clicked.push((el.textContent || "").trim());
            }}, {CLICK_DELAY_MS});
        }} catch (e) {{
            // Ignore nodes that refuse to scroll or click.
        }}
    }}
    return new Promise((resolve) => {{
        setTimeout(() => resolve(clicked), {CLICK_SETTLE_MS});
    }});
}})()"#
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_script_escapes_selector() {
        let script = candidate_collection_script(r#"button, [role="button"]"#);
        assert!(script.contains(r#""button, [role=\"button\"]""#));
        assert!(script.contains("window.__expandCandidates"));
        assert!(script.contains(".trim()"));
    }

    #[test]
    fn test_click_script_embeds_indices() {
        let script = indexed_click_script(&[0, 3, 7]);
        assert!(script.contains("const indices = [0,3,7];"));
        assert!(script.contains("isConnected"));
        assert!(script.contains(r#"scrollIntoView({ behavior: "smooth", block: "center" })"#));
    }

    #[test]
    fn test_click_script_timing() {
        let script = indexed_click_script(&[1]);
        assert!(script.contains("}, 100);"));
        assert!(script.contains("setTimeout(() => resolve(clicked), 2000);"));
    }
}
