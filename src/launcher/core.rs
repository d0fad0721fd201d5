//! Chromium launcher and browser factory.
//!
//! The [`Launcher`] struct acts as the central coordinator for browser
//! automation. It manages the lifecycle of launched browsers.
//!
//! # Example
//!
//! ```no_run
//! use resume_export::{ChromeOptions, Launcher};
//!
//! # async fn example() -> resume_export::Result<()> {
//! let launcher = Launcher::builder().build()?;
//!
//! let browser = launcher.launch(ChromeOptions::hardened()).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::browser::Browser;
use crate::error::{Error, Result};
use crate::transport::{Connection, DevToolsEndpoint};

use super::builder::LauncherBuilder;
use super::options::ChromeOptions;
use super::profile::Profile;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the launcher.
pub(crate) struct LauncherInner {
    /// Path to the Chromium binary executable.
    pub binary: PathBuf,

    /// Active browsers tracked by their internal UUID.
    pub browsers: Mutex<FxHashMap<uuid::Uuid, Browser>>,
}

// ============================================================================
// Launcher
// ============================================================================

/// Chromium launcher.
///
/// The launcher is responsible for:
/// - Spawning Chromium processes with private user data directories
/// - Discovering and connecting to the DevTools endpoint
/// - Tracking launched browsers
///
/// # Examples
///
/// ```no_run
/// use resume_export::{ChromeOptions, Launcher};
///
/// # async fn example() -> resume_export::Result<()> {
/// let launcher = Launcher::builder()
///     .binary("/usr/bin/chromium")
///     .build()?;
///
/// let browser = launcher.launch(ChromeOptions::hardened()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Launcher {
    /// Shared inner state.
    pub(crate) inner: Arc<LauncherInner>,
}

// ============================================================================
// Launcher - Display
// ============================================================================

impl fmt::Debug for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launcher")
            .field("binary", &self.inner.binary)
            .field("browser_count", &self.browser_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Launcher - Public API
// ============================================================================

impl Launcher {
    /// Creates a configuration builder for the launcher.
    #[inline]
    #[must_use]
    pub fn builder() -> LauncherBuilder {
        LauncherBuilder::new()
    }

    /// Launches a Chromium browser with the specified configuration.
    ///
    /// This method:
    /// 1. Creates a temporary user data directory
    /// 2. Spawns the Chromium process with `--remote-debugging-port=0`
    /// 3. Waits for the browser to publish its DevTools endpoint
    /// 4. Connects to the endpoint over WebSocket
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The options fail validation
    /// - The process fails to spawn
    /// - The endpoint never appears
    /// - The WebSocket connection fails
    pub async fn launch(&self, options: ChromeOptions) -> Result<Browser> {
        options.validate().map_err(Error::config)?;

        let profile = Profile::new_temp()?;

        let mut child = self.spawn_chrome_process(&profile, &options)?;
        let pid = child.id();
        info!(pid, hardened = options.is_hardened(), "Chromium process spawned");

        let endpoint = match DevToolsEndpoint::discover(profile.path()).await {
            Ok(endpoint) => endpoint,
            Err(e) => {
                let _ = child.start_kill();
                return Err(e);
            }
        };

        let connection = match Connection::connect(endpoint.ws_url()).await {
            Ok(connection) => connection,
            Err(e) => {
                let _ = child.start_kill();
                return Err(e);
            }
        };

        let browser = Browser::new(connection, child, profile, endpoint.port());

        let version = browser.version().await?;
        debug!(product = %version.product, "Browser version reported");

        self.inner
            .browsers
            .lock()
            .insert(*browser.uuid(), browser.clone());

        info!(
            port = endpoint.port(),
            browser_count = self.browser_count(),
            "Browser launched"
        );

        Ok(browser)
    }

    /// Returns the number of active browsers currently tracked.
    #[inline]
    #[must_use]
    pub fn browser_count(&self) -> usize {
        self.inner.browsers.lock().len()
    }

    /// Closes all active browsers and shuts down the launcher.
    ///
    /// # Errors
    ///
    /// Returns an error if any browser fails to close.
    pub async fn close(&self) -> Result<()> {
        let browsers: Vec<Browser> = {
            let mut map = self.inner.browsers.lock();
            map.drain().map(|(_, b)| b).collect()
        };

        info!(count = browsers.len(), "Shutting down all browsers");

        for browser in browsers {
            if let Err(e) = browser.close().await {
                debug!(error = %e, "Error closing browser during shutdown");
            }
        }

        Ok(())
    }
}

// ============================================================================
// Launcher - Internal API
// ============================================================================

impl Launcher {
    /// Creates a new launcher instance.
    pub(crate) fn new(binary: PathBuf) -> Self {
        let inner = Arc::new(LauncherInner {
            binary,
            browsers: Mutex::new(FxHashMap::default()),
        });

        Self { inner }
    }

    /// Spawns the Chromium process with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `profile` - User data directory to use
    /// * `options` - Chromium launch options
    ///
    /// # Errors
    ///
    /// Returns an error if the process fails to spawn.
    fn spawn_chrome_process(&self, profile: &Profile, options: &ChromeOptions) -> Result<Child> {
        let mut cmd = Command::new(&self.inner.binary);

        // Debugging endpoint on an OS-assigned port, private data dir
        cmd.arg("--remote-debugging-port=0")
            .arg(format!("--user-data-dir={}", profile.path().display()));

        // User-specified options
        cmd.args(options.to_args());

        // Initial page
        cmd.arg("about:blank");

        // Suppress stdio
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        cmd.spawn().map_err(Error::process_launch_failed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Launcher;

    #[test]
    fn test_builder_returns_launcher_builder() {
        let _builder = Launcher::builder();
    }

    #[test]
    fn test_launcher_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Launcher>();
    }

    #[test]
    fn test_launcher_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Launcher>();
    }
}
