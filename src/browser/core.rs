//! Browser process handle and page factory.
//!
//! Each [`Browser`] owns:
//! - One Chromium process (child process)
//! - One WebSocket connection to its DevTools endpoint
//! - One profile directory (temporary user data dir)
//!
//! Pages are flat CDP sessions multiplexed over the single connection;
//! [`Browser::new_page`] attaches a session and hands back a [`Page`].
//!
//! # Example
//!
//! ```no_run
//! use resume_export::{ChromeOptions, Launcher};
//!
//! # async fn example() -> resume_export::Result<()> {
//! let launcher = Launcher::builder().build()?;
//! let browser = launcher.launch(ChromeOptions::hardened()).await?;
//!
//! let page = browser.new_page().await?;
//! page.navigate("https://example.com").await?;
//!
//! browser.close().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::process::Child;
use tokio::sync::oneshot;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::identifiers::{SessionId, SubscriptionId, TargetId};
use crate::launcher::Profile;
use crate::protocol::{BrowserCommand, Command, Event, ParsedEvent, Request, Response, TargetCommand};
use crate::transport::Connection;

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// How long to wait for `Browser.close` to be acknowledged before the
/// process is killed outright.
const GRACEFUL_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// ProcessGuard
// ============================================================================

/// Guards a child process and ensures it is killed when dropped.
struct ProcessGuard {
    /// The child process handle.
    child: Option<Child>,
    /// Process ID for logging.
    pid: u32,
}

impl ProcessGuard {
    /// Creates a new process guard.
    fn new(child: Child) -> Self {
        let pid = child.id().unwrap_or(0);
        debug!(pid, "Process guard created");
        Self {
            child: Some(child),
            pid,
        }
    }

    /// Kills the process and waits for it to exit.
    async fn kill(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            debug!(pid = self.pid, "Killing Chromium process");
            if let Err(e) = child.kill().await {
                debug!(pid = self.pid, error = %e, "Failed to kill process");
            }
            if let Err(e) = child.wait().await {
                debug!(pid = self.pid, error = %e, "Failed to wait for process");
            }
            info!(pid = self.pid, "Process terminated");
        }
        Ok(())
    }

    /// Returns the process ID.
    #[inline]
    fn pid(&self) -> u32 {
        self.pid
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!(pid = self.pid, error = %e, "Failed to send kill signal in Drop");
        }
    }
}

// ============================================================================
// BrowserVersion
// ============================================================================

/// Version metadata reported by `Browser.getVersion`.
#[derive(Debug, Clone)]
pub struct BrowserVersion {
    /// Product name and version, e.g. `Chrome/120.0.6099.109`.
    pub product: String,
    /// DevTools protocol version.
    pub protocol_version: String,
    /// Default user agent the browser sends.
    pub user_agent: String,
}

// ============================================================================
// EventWaiter
// ============================================================================

/// A one-shot subscription for a single protocol event.
struct EventWaiter {
    /// Event method name to match, e.g. `Page.domContentEventFired`.
    method: &'static str,
    /// Session filter. `None` matches events from any session.
    session_id: Option<SessionId>,
    /// Completed with the first matching event.
    tx: oneshot::Sender<Event>,
}

impl EventWaiter {
    /// Returns true when the event satisfies this waiter's filters.
    fn matches(&self, event: &Event) -> bool {
        if event.method != self.method {
            return false;
        }
        match &self.session_id {
            Some(session_id) => event.is_for_session(session_id),
            None => true,
        }
    }
}

/// Shared waiter registry, keyed by subscription id.
type WaiterMap = FxHashMap<SubscriptionId, EventWaiter>;

/// Routes an incoming event to every waiter it satisfies.
///
/// Waiters are one-shot: a completed waiter is removed from the map. Detach
/// events are logged even when nothing waits for them, since they usually
/// mean the page or the whole browser went away underneath us.
fn dispatch_event(waiters: &Mutex<WaiterMap>, event: &Event) {
    match event.parse() {
        ParsedEvent::DetachedFromTarget { session_id, target_id } => {
            debug!(session_id = %session_id, target_id = %target_id, "Session detached from target");
        }
        ParsedEvent::InspectorDetached { reason } => {
            warn!(reason = %reason, "Inspector detached");
        }
        _ => {}
    }

    let mut map = waiters.lock();
    let matched: Vec<SubscriptionId> = map
        .iter()
        .filter(|(_, waiter)| waiter.matches(event))
        .map(|(id, _)| *id)
        .collect();

    for id in matched {
        if let Some(waiter) = map.remove(&id) {
            // Receiver may have been dropped after a wait timeout.
            let _ = waiter.tx.send(event.clone());
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a browser.
pub(crate) struct BrowserInner {
    /// Unique identifier for this browser.
    pub uuid: Uuid,
    /// Protected process handle.
    process: Mutex<ProcessGuard>,
    /// WebSocket connection to the DevTools endpoint.
    pub connection: Connection,
    /// Profile directory. Held so a temporary user data dir outlives the
    /// process.
    #[allow(dead_code)]
    profile: Profile,
    /// DevTools endpoint port number.
    pub port: u16,
    /// Attached page sessions by target.
    sessions: Mutex<FxHashMap<TargetId, SessionId>>,
    /// Pending one-shot event subscriptions.
    waiters: Arc<Mutex<WaiterMap>>,
}

// ============================================================================
// Browser
// ============================================================================

/// A handle to a running Chromium browser.
///
/// The browser owns a Chromium process, a WebSocket connection, and a
/// profile directory. When the last handle is dropped, the process is
/// automatically killed.
///
/// # Example
///
/// ```no_run
/// # use resume_export::{ChromeOptions, Launcher};
/// # async fn example() -> resume_export::Result<()> {
/// # let launcher = Launcher::builder().build()?;
/// let browser = launcher.launch(ChromeOptions::new()).await?;
///
/// // Open a page session
/// let page = browser.new_page().await?;
///
/// // Close the browser
/// browser.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Browser {
    /// Shared inner state.
    pub(crate) inner: Arc<BrowserInner>,
}

// ============================================================================
// Browser - Display
// ============================================================================

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("uuid", &self.inner.uuid)
            .field("port", &self.inner.port)
            .field("page_count", &self.page_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Browser - Constructor
// ============================================================================

impl Browser {
    /// Creates a new browser handle and installs the event dispatcher on
    /// the connection.
    pub(crate) fn new(connection: Connection, process: Child, profile: Profile, port: u16) -> Self {
        let uuid = Uuid::new_v4();
        let waiters: Arc<Mutex<WaiterMap>> = Arc::new(Mutex::new(FxHashMap::default()));

        let dispatcher_waiters = Arc::clone(&waiters);
        connection.set_event_handler(Box::new(move |event| {
            dispatch_event(&dispatcher_waiters, &event);
        }));

        debug!(uuid = %uuid, port, "Browser handle created");

        Self {
            inner: Arc::new(BrowserInner {
                uuid,
                process: Mutex::new(ProcessGuard::new(process)),
                connection,
                profile,
                port,
                sessions: Mutex::new(FxHashMap::default()),
                waiters,
            }),
        }
    }
}

// ============================================================================
// Browser - Accessors
// ============================================================================

impl Browser {
    /// Returns the Rust-side unique UUID.
    #[inline]
    #[must_use]
    pub fn uuid(&self) -> &Uuid {
        &self.inner.uuid
    }

    /// Returns the DevTools endpoint port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.inner.port
    }

    /// Returns the Chromium process ID.
    #[inline]
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.inner.process.lock().pid()
    }

    /// Returns the number of attached page sessions.
    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.inner.sessions.lock().len()
    }
}

// ============================================================================
// Browser - Version
// ============================================================================

impl Browser {
    /// Queries version metadata from the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or times out.
    pub async fn version(&self) -> Result<BrowserVersion> {
        let command = Command::Browser(BrowserCommand::GetVersion);
        let response = self.send_command(command).await?;

        let version = BrowserVersion {
            product: response.get_string("product"),
            protocol_version: response.get_string("protocolVersion"),
            user_agent: response.get_string("userAgent"),
        };
        trace!(product = %version.product, "Browser version reported");
        Ok(version)
    }
}

// ============================================================================
// Browser - Page Management
// ============================================================================

impl Browser {
    /// Opens a new page and attaches a flat session to it.
    ///
    /// The page starts on `about:blank` with page and network events
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if target creation or attachment fails.
    pub async fn new_page(&self) -> Result<Page> {
        let command = Command::Target(TargetCommand::CreateTarget {
            url: "about:blank".to_string(),
        });
        let response = self.send_command(command).await?;

        let target_id = response.get_string("targetId");
        if target_id.is_empty() {
            return Err(Error::protocol("Expected targetId in createTarget response"));
        }
        let target_id = TargetId::new(target_id);

        let command = Command::Target(TargetCommand::AttachToTarget {
            target_id: target_id.clone(),
            flatten: true,
        });
        let response = self.send_command(command).await?;

        let session_id = response.get_string("sessionId");
        if session_id.is_empty() {
            return Err(Error::protocol("Expected sessionId in attachToTarget response"));
        }
        let session_id = SessionId::new(session_id);

        self.inner
            .sessions
            .lock()
            .insert(target_id.clone(), session_id.clone());

        let page = Page::new(self.clone(), target_id, session_id);
        page.init().await?;

        debug!(
            target_id = %page.target_id(),
            session_id = %page.session_id(),
            "New page attached"
        );
        Ok(page)
    }

    /// Removes a closed target from the session registry.
    pub(crate) fn forget_session(&self, target_id: &TargetId) {
        self.inner.sessions.lock().remove(target_id);
    }
}

// ============================================================================
// Browser - Event Subscriptions
// ============================================================================

impl Browser {
    /// Registers a one-shot wait for the next matching event.
    ///
    /// The returned receiver completes with the first event whose method
    /// matches, filtered to `session_id` when given. Callers that stop
    /// waiting early must [`unsubscribe`](Self::unsubscribe) to release
    /// the slot.
    pub(crate) fn subscribe(
        &self,
        method: &'static str,
        session_id: Option<SessionId>,
    ) -> (SubscriptionId, oneshot::Receiver<Event>) {
        let (tx, rx) = oneshot::channel();
        let id = SubscriptionId::next();
        self.inner.waiters.lock().insert(
            id,
            EventWaiter {
                method,
                session_id,
                tx,
            },
        );
        trace!(subscription_id = %id, method, "Event subscription registered");
        (id, rx)
    }

    /// Drops a pending event subscription.
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.waiters.lock().remove(&id);
    }
}

// ============================================================================
// Browser - Lifecycle
// ============================================================================

impl Browser {
    /// Closes the browser.
    ///
    /// Attempts a graceful `Browser.close` first, then shuts the
    /// connection down and kills the process if it is still running.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be killed.
    #[allow(clippy::await_holding_lock)]
    pub async fn close(&self) -> Result<()> {
        debug!(uuid = %self.inner.uuid, "Closing browser");

        let request = Request::new(Command::Browser(BrowserCommand::Close));
        if let Err(e) = self
            .inner
            .connection
            .send_with_timeout(request, GRACEFUL_CLOSE_TIMEOUT)
            .await
        {
            debug!(error = %e, "Graceful close not acknowledged");
        }

        self.inner.connection.shutdown();
        let mut guard = self.inner.process.lock();
        guard.kill().await?;
        info!(uuid = %self.inner.uuid, "Browser closed");
        Ok(())
    }
}

// ============================================================================
// Browser - Internal
// ============================================================================

impl Browser {
    /// Sends a browser-level command and waits for the response.
    ///
    /// Error responses from the browser are converted to [`Error::Cdp`].
    pub(crate) async fn send_command(&self, command: Command) -> Result<Response> {
        let request = Request::new(command);
        self.inner.connection.send(request).await?.check()
    }

    /// Sends a raw request and waits for the response.
    ///
    /// Used by pages to send session-scoped requests over the shared
    /// connection.
    pub(crate) async fn send_request(&self, request: Request) -> Result<Response> {
        self.inner.connection.send(request).await?.check()
    }

    /// Sends a raw request with a custom response timeout.
    pub(crate) async fn send_request_with_timeout(
        &self,
        request: Request,
        timeout: Duration,
    ) -> Result<Response> {
        self.inner
            .connection
            .send_with_timeout(request, timeout)
            .await?
            .check()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: &str) -> Event {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_browser_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Browser>();
    }

    #[test]
    fn test_browser_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Browser>();
    }

    #[test]
    fn test_waiter_matches_method() {
        let (tx, _rx) = oneshot::channel();
        let waiter = EventWaiter {
            method: Event::LOAD_EVENT_FIRED,
            session_id: None,
            tx,
        };

        let load = event(r#"{"method":"Page.loadEventFired","params":{"timestamp":1.0}}"#);
        let dom = event(r#"{"method":"Page.domContentEventFired","params":{"timestamp":1.0}}"#);

        assert!(waiter.matches(&load));
        assert!(!waiter.matches(&dom));
    }

    #[test]
    fn test_waiter_filters_by_session() {
        let (tx, _rx) = oneshot::channel();
        let waiter = EventWaiter {
            method: Event::LOAD_EVENT_FIRED,
            session_id: Some(SessionId::new("AAA")),
            tx,
        };

        let matching =
            event(r#"{"method":"Page.loadEventFired","params":{},"sessionId":"AAA"}"#);
        let other = event(r#"{"method":"Page.loadEventFired","params":{},"sessionId":"BBB"}"#);
        let sessionless = event(r#"{"method":"Page.loadEventFired","params":{}}"#);

        assert!(waiter.matches(&matching));
        assert!(!waiter.matches(&other));
        assert!(!waiter.matches(&sessionless));
    }

    #[test]
    fn test_dispatch_completes_matching_waiter() {
        let waiters: Mutex<WaiterMap> = Mutex::new(FxHashMap::default());
        let (tx, mut rx) = oneshot::channel();
        let id = SubscriptionId::next();
        waiters.lock().insert(
            id,
            EventWaiter {
                method: Event::DOM_CONTENT_EVENT_FIRED,
                session_id: None,
                tx,
            },
        );

        let incoming =
            event(r#"{"method":"Page.domContentEventFired","params":{"timestamp":42.0}}"#);
        dispatch_event(&waiters, &incoming);

        let delivered = rx.try_recv().expect("waiter should be completed");
        assert_eq!(delivered.method, Event::DOM_CONTENT_EVENT_FIRED);
        assert!(waiters.lock().is_empty());
    }

    #[test]
    fn test_dispatch_keeps_non_matching_waiter() {
        let waiters: Mutex<WaiterMap> = Mutex::new(FxHashMap::default());
        let (tx, mut rx) = oneshot::channel();
        let id = SubscriptionId::next();
        waiters.lock().insert(
            id,
            EventWaiter {
                method: Event::LOAD_EVENT_FIRED,
                session_id: None,
                tx,
            },
        );

        let incoming = event(r#"{"method":"Page.domContentEventFired","params":{}}"#);
        dispatch_event(&waiters, &incoming);

        assert!(rx.try_recv().is_err());
        assert_eq!(waiters.lock().len(), 1);
    }

    #[test]
    fn test_dispatch_handles_detach_without_waiters() {
        let waiters: Mutex<WaiterMap> = Mutex::new(FxHashMap::default());
        let incoming = event(
            r#"{"method":"Target.detachedFromTarget","params":{"sessionId":"S1","targetId":"T1"}}"#,
        );
        dispatch_event(&waiters, &incoming);
        assert!(waiters.lock().is_empty());
    }
}
