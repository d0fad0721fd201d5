//! DevTools endpoint discovery.
//!
//! This module locates the WebSocket endpoint of a freshly launched
//! browser process.
//!
//! # Discovery Flow
//!
//! 1. Browser is launched with `--remote-debugging-port=0` and a private
//!    user data directory
//! 2. Browser picks a free port and writes `DevToolsActivePort` into the
//!    data directory (line 1: port, line 2: browser target path)
//! 3. We poll for the file, parse it, and build the WebSocket URL
//! 4. [`Connection::connect`](super::Connection::connect) dials the URL
//!
//! The file appears only after the browser has fully initialized its
//! debugging server, so discovery doubles as a startup barrier.

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// File the browser writes its debugging port into.
const ACTIVE_PORT_FILE: &str = "DevToolsActivePort";

/// Default timeout for the file to appear.
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval while waiting for the file.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// DevToolsEndpoint
// ============================================================================

/// A discovered DevTools WebSocket endpoint.
///
/// # Example
///
/// ```ignore
/// let endpoint = DevToolsEndpoint::discover(profile.path()).await?;
/// let connection = Connection::connect(endpoint.ws_url()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DevToolsEndpoint {
    /// Debugging port the browser bound.
    port: u16,
    /// Full WebSocket URL of the browser target.
    url: Url,
}

impl DevToolsEndpoint {
    /// Waits for the browser to publish its endpoint, with default timeout.
    ///
    /// # Arguments
    ///
    /// * `user_data_dir` - The user data directory the browser was
    ///   launched with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if the file does not appear (or never
    /// parses) within 30s.
    pub async fn discover(user_data_dir: &Path) -> Result<Self> {
        Self::discover_with_timeout(user_data_dir, DISCOVERY_TIMEOUT).await
    }

    /// Waits for the browser to publish its endpoint.
    ///
    /// Polls every 100ms until the file exists and parses. A file that
    /// exists but fails to parse is retried; the browser writes the port
    /// line before the target path line, so a partial read is normal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if discovery does not complete within
    /// the given timeout.
    pub async fn discover_with_timeout(
        user_data_dir: &Path,
        discovery_timeout: Duration,
    ) -> Result<Self> {
        let path = user_data_dir.join(ACTIVE_PORT_FILE);
        let deadline = Instant::now() + discovery_timeout;

        debug!(path = %path.display(), "Waiting for DevTools endpoint");

        loop {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => match Self::from_active_port_file(&contents) {
                    Ok(endpoint) => {
                        debug!(
                            port = endpoint.port,
                            url = %endpoint.url,
                            "DevTools endpoint discovered"
                        );
                        return Ok(endpoint);
                    }
                    Err(e) => {
                        trace!(error = %e, "Endpoint file not complete yet");
                    }
                },
                Err(e) => {
                    trace!(error = %e, "Endpoint file not readable yet");
                }
            }

            if Instant::now() >= deadline {
                return Err(Error::endpoint(format!(
                    "DevToolsActivePort not available in {} after {}ms",
                    user_data_dir.display(),
                    discovery_timeout.as_millis()
                )));
            }

            sleep(POLL_INTERVAL).await;
        }
    }

    /// Parses the two-line `DevToolsActivePort` format.
    fn from_active_port_file(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();

        let port_line = lines
            .next()
            .ok_or_else(|| Error::endpoint("DevToolsActivePort is empty"))?;
        let port: u16 = port_line.trim().parse().map_err(|_| {
            Error::endpoint(format!("Invalid port in DevToolsActivePort: {port_line:?}"))
        })?;

        let path_line = lines
            .next()
            .ok_or_else(|| Error::endpoint("DevToolsActivePort is missing the target path"))?;
        let target_path = path_line.trim();
        if !target_path.starts_with('/') {
            return Err(Error::endpoint(format!(
                "Invalid target path in DevToolsActivePort: {target_path:?}"
            )));
        }

        let url = Url::parse(&format!("ws://127.0.0.1:{port}{target_path}"))
            .map_err(|e| Error::endpoint(format!("Invalid endpoint URL: {e}")))?;

        Ok(Self { port, url })
    }

    /// Returns the debugging port the browser bound.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the WebSocket URL of the browser target.
    ///
    /// Format: `ws://127.0.0.1:{port}/devtools/browser/{uuid}`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> &str {
        self.url.as_str()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_active_port_file() {
        let contents = "33411\n/devtools/browser/1a2b3c4d-5e6f-7089-a0b1-c2d3e4f50617\n";
        let endpoint = DevToolsEndpoint::from_active_port_file(contents).expect("parse");

        assert_eq!(endpoint.port(), 33411);
        assert_eq!(
            endpoint.ws_url(),
            "ws://127.0.0.1:33411/devtools/browser/1a2b3c4d-5e6f-7089-a0b1-c2d3e4f50617"
        );
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let contents = "9222\n/devtools/browser/abc";
        let endpoint = DevToolsEndpoint::from_active_port_file(contents).expect("parse");

        assert_eq!(endpoint.port(), 9222);
    }

    #[test]
    fn test_parse_rejects_empty_file() {
        assert!(DevToolsEndpoint::from_active_port_file("").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_path() {
        // Port line written, path line not flushed yet
        let contents = "33411\n";
        assert!(DevToolsEndpoint::from_active_port_file(contents).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        let contents = "not-a-port\n/devtools/browser/abc";
        assert!(DevToolsEndpoint::from_active_port_file(contents).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_path() {
        let contents = "9222\ndevtools/browser/abc";
        assert!(DevToolsEndpoint::from_active_port_file(contents).is_err());
    }

    #[tokio::test]
    async fn test_discover_waits_for_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file_path = dir.path().join(ACTIVE_PORT_FILE);

        let writer = tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            std::fs::write(&file_path, "41999\n/devtools/browser/test-uuid").expect("write");
        });

        let endpoint =
            DevToolsEndpoint::discover_with_timeout(dir.path(), Duration::from_secs(2))
                .await
                .expect("discover");

        assert_eq!(endpoint.port(), 41999);
        writer.await.expect("writer task");
    }

    #[tokio::test]
    async fn test_discover_times_out() {
        let dir = tempfile::tempdir().expect("tempdir");

        let result =
            DevToolsEndpoint::discover_with_timeout(dir.path(), Duration::from_millis(200)).await;

        assert!(result.is_err());
    }
}
