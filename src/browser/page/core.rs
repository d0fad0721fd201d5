//! Core Page struct and accessors.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::{SessionId, TargetId};
use crate::protocol::{Command, NetworkCommand, PageCommand, Request, Response, TargetCommand};

use crate::browser::Browser;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a page.
pub(crate) struct PageInner {
    /// Target backing this page.
    pub target_id: TargetId,
    /// Flat session attached to the target.
    pub session_id: SessionId,
    /// Owning browser.
    pub browser: Browser,
}

// ============================================================================
// Page
// ============================================================================

/// A handle to a browser page.
///
/// Pages provide methods for navigation, scripting, DOM manipulation,
/// scrolling, and PDF export. All commands are session-scoped and travel
/// over the owning browser's connection.
#[derive(Clone)]
pub struct Page {
    pub(crate) inner: Arc<PageInner>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("target_id", &self.inner.target_id)
            .field("session_id", &self.inner.session_id)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Creates a new page handle.
    pub(crate) fn new(browser: Browser, target_id: TargetId, session_id: SessionId) -> Self {
        Self {
            inner: Arc::new(PageInner {
                target_id,
                session_id,
                browser,
            }),
        }
    }
}

// ============================================================================
// Page - Accessors
// ============================================================================

impl Page {
    /// Returns the target ID.
    #[inline]
    #[must_use]
    pub fn target_id(&self) -> &TargetId {
        &self.inner.target_id
    }

    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.inner.session_id
    }

    /// Returns the owning browser.
    #[inline]
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.inner.browser
    }
}

// ============================================================================
// Page - Lifecycle
// ============================================================================

impl Page {
    /// Enables the protocol domains every page needs.
    ///
    /// `Page.enable` turns on lifecycle events (DOMContentLoaded, load);
    /// `Network.enable` is required before user agent or header overrides
    /// take effect.
    pub(crate) async fn init(&self) -> Result<()> {
        self.send_command(Command::Page(PageCommand::Enable)).await?;
        self.send_command(Command::Network(NetworkCommand::Enable))
            .await?;
        Ok(())
    }

    /// Closes the page's target.
    ///
    /// # Errors
    ///
    /// Returns an error if the close command fails.
    pub async fn close(&self) -> Result<()> {
        debug!(target_id = %self.inner.target_id, "Closing page");
        let command = Command::Target(TargetCommand::CloseTarget {
            target_id: self.inner.target_id.clone(),
        });
        // closeTarget is browser-level, not session-scoped.
        self.inner.browser.send_command(command).await?;
        self.inner.browser.forget_session(&self.inner.target_id);
        Ok(())
    }
}

// ============================================================================
// Page - Internal
// ============================================================================

impl Page {
    /// Sends a session-scoped command and returns the response.
    pub(crate) async fn send_command(&self, command: Command) -> Result<Response> {
        let request = Request::for_session(self.inner.session_id.clone(), command);
        self.inner.browser.send_request(request).await
    }

    /// Sends a session-scoped command with a custom response timeout.
    pub(crate) async fn send_command_with_timeout(
        &self,
        command: Command,
        timeout: Duration,
    ) -> Result<Response> {
        let request = Request::for_session(self.inner.session_id.clone(), command);
        self.inner
            .browser
            .send_request_with_timeout(request, timeout)
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn test_page_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Page>();
    }

    #[test]
    fn test_page_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Page>();
    }
}
