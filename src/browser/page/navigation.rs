//! Page navigation methods.

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::FrameId;
use crate::protocol::{Command, Event, PageCommand};

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// Default deadline for a navigation to reach DOMContentLoaded.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(120);

// ============================================================================
// Page - Navigation
// ============================================================================

impl Page {
    /// Navigates to a URL and waits for DOMContentLoaded.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to navigate to
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the browser reports a
    /// navigation failure, or DOMContentLoaded does not fire within the
    /// default deadline.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.navigate_with_timeout(url, NAVIGATION_TIMEOUT).await
    }

    /// Navigates to a URL with a custom DOMContentLoaded deadline.
    ///
    /// # Errors
    ///
    /// Same as [`navigate`](Self::navigate).
    pub async fn navigate_with_timeout(&self, url: &str, deadline: Duration) -> Result<()> {
        Url::parse(url)
            .map_err(|e| Error::invalid_argument(format!("Invalid URL {url:?}: {e}")))?;

        debug!(url = %url, target_id = %self.inner.target_id, "Navigating");

        // Subscribe before sending so the event cannot slip past us.
        let (subscription_id, dom_content) = self.inner.browser.subscribe(
            Event::DOM_CONTENT_EVENT_FIRED,
            Some(self.inner.session_id.clone()),
        );

        let command = Command::Page(PageCommand::Navigate {
            url: url.to_string(),
        });
        let response = match self.send_command(command).await {
            Ok(response) => response,
            Err(e) => {
                self.inner.browser.unsubscribe(subscription_id);
                return Err(e);
            }
        };

        // Net errors (DNS failure, connection refused) come back as a
        // successful response with a non-empty errorText.
        let error_text = response.get_string("errorText");
        if !error_text.is_empty() {
            self.inner.browser.unsubscribe(subscription_id);
            return Err(Error::navigation_failed(url, error_text));
        }

        let frame_id = FrameId::new(response.get_string("frameId"));

        match timeout(deadline, dom_content).await {
            Ok(Ok(_)) => {
                debug!(url = %url, frame_id = %frame_id, "DOMContentLoaded fired");
                Ok(())
            }
            Ok(Err(_)) => Err(Error::ConnectionClosed),
            Err(_) => {
                self.inner.browser.unsubscribe(subscription_id);
                Err(Error::timeout(
                    format!("navigate to {url}"),
                    deadline.as_millis() as u64,
                ))
            }
        }
    }

    /// Gets the current page title.
    pub async fn title(&self) -> Result<String> {
        let result = self.evaluate("document.title").await?;
        let title = result.as_str().unwrap_or("").to_string();
        debug!(target_id = %self.inner.target_id, title = %title, "Got page title");
        Ok(title)
    }

    /// Gets the current URL.
    pub async fn url(&self) -> Result<String> {
        let result = self.evaluate("window.location.href").await?;
        let url = result.as_str().unwrap_or("").to_string();
        debug!(target_id = %self.inner.target_id, url = %url, "Got page URL");
        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::NAVIGATION_TIMEOUT;

    #[test]
    fn test_navigation_timeout_is_two_minutes() {
        assert_eq!(NAVIGATION_TIMEOUT.as_secs(), 120);
    }
}
