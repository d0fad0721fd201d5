//! Scroll control methods.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// Pixels advanced per scroll tick.
const SCROLL_STEP_PX: u32 = 100;

/// Default tick cadence for the incremental scroll.
const SCROLL_INTERVAL_MS: u64 = 100;

/// Deadline for one full incremental scroll to complete.
const SCROLL_TIMEOUT: Duration = Duration::from_secs(180);

// ============================================================================
// Page - Scroll
// ============================================================================

impl Page {
    /// Scrolls to the bottom of the page in fixed steps.
    ///
    /// Advances 100 px every 100 ms until the accumulated distance covers
    /// `document.body.scrollHeight`, giving lazily-loaded content time to
    /// render as it comes into view.
    ///
    /// # Example
    ///
    /// ```ignore
    /// page.scroll_to_bottom().await?;
    /// ```
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.scroll_to_bottom_with_interval(SCROLL_INTERVAL_MS).await
    }

    /// Scrolls to the bottom in fixed steps with a custom tick cadence.
    ///
    /// A slower cadence gives freshly expanded sections more time to load
    /// while scrolling past them.
    ///
    /// # Arguments
    ///
    /// * `interval_ms` - Milliseconds between scroll ticks
    pub async fn scroll_to_bottom_with_interval(&self, interval_ms: u64) -> Result<()> {
        debug!(target_id = %self.inner.target_id, interval_ms, "Scrolling to bottom incrementally");

        let script = incremental_scroll_script(SCROLL_STEP_PX, interval_ms);
        self.evaluate_async_with_timeout(&script, SCROLL_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Scrolls to the top of the page.
    pub async fn scroll_to_top(&self) -> Result<()> {
        debug!(target_id = %self.inner.target_id, "Scrolling to top");
        self.evaluate("window.scrollTo(0, 0);").await?;
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the stepped-scroll page script.
///
/// Resolves once the accumulated distance reaches the document height as
/// measured at each tick, so content appended mid-scroll extends the run.
fn incremental_scroll_script(step_px: u32, interval_ms: u64) -> String {
    format!(
        r#"new Promise((resolve) => {{
    let totalHeight = 0;
    const distance = {step_px};
    const timer = setInterval(() => {{
        const scrollHeight = document.body.scrollHeight;
        window.scrollBy(0, distance);
        totalHeight += distance;

        if (totalHeight >= scrollHeight) {{
            clearInterval(timer);
            resolve();
        }}
    }}, {interval_ms});
}})"#
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_script_embeds_step_and_interval() {
        let script = incremental_scroll_script(100, 150);
        assert!(script.contains("const distance = 100;"));
        assert!(script.contains("}, 150);"));
        assert!(script.contains("document.body.scrollHeight"));
        assert!(script.contains("window.scrollBy(0, distance);"));
    }

    #[test]
    fn test_scroll_script_is_a_promise() {
        let script = incremental_scroll_script(SCROLL_STEP_PX, SCROLL_INTERVAL_MS);
        assert!(script.starts_with("new Promise((resolve) =>"));
        assert!(script.contains("clearInterval(timer);"));
    }

    #[test]
    fn test_default_cadence() {
        assert_eq!(SCROLL_STEP_PX, 100);
        assert_eq!(SCROLL_INTERVAL_MS, 100);
    }
}
