//! Chromium-driven exporter that captures a profile page as a
//! multi-page PDF.
//!
//! The crate drives a real Chromium over the DevTools protocol: it
//! launches the browser with a hardened configuration, waits out basic
//! bot-protection challenge pages, expands every collapsed "See More"
//! section, and prints the fully rendered page through the browser's
//! print pipeline.
//!
//! # Architecture
//!
//! All browser interaction travels over one WebSocket connection to the
//! DevTools endpoint of a freshly launched Chromium:
//!
//! - Each [`Browser`] owns: Chromium process + WebSocket connection +
//!   temporary profile directory
//! - Pages are flat CDP sessions multiplexed over that connection; a
//!   [`Page`] carries its `sessionId` on every command
//! - The endpoint is discovered through the `DevToolsActivePort` file,
//!   so no fixed debugging port is ever bound
//!
//! # Quick Start
//!
//! ```no_run
//! use resume_export::{ChromeOptions, Launcher, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Resolve the Chromium binary and launch hardened
//!     let launcher = Launcher::builder().build()?;
//!     let browser = launcher.launch(ChromeOptions::hardened()).await?;
//!
//!     // Navigate and export
//!     let page = browser.new_page().await?;
//!     page.navigate("https://example.com").await?;
//!     page.pdf().a4().margins_inches(0.5).save("example.pdf").await?;
//!
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! The complete export workflow, including challenge handling and
//! section expansion, lives in [`export::run`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Browser entities: [`Browser`], [`Page`], [`PdfBuilder`] |
//! | [`export`] | The profile-to-PDF workflow (both modes) |
//! | [`launcher`] | Chromium discovery, launch options, profiles |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | DevTools message types (internal) |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Browser entities: Browser, Page, PdfBuilder.
///
/// This module contains the core types for browser automation:
///
/// - [`Browser`] - Running browser (owns the Chromium process)
/// - [`Page`] - Page target driven over a flat CDP session
/// - [`PdfBuilder`] - Print-to-PDF configuration and capture
pub mod browser;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// The profile-to-PDF export workflow.
///
/// Use [`export::run`] with a [`export::Mode`] to run either mode end
/// to end.
pub mod export;

/// Type-safe identifiers for protocol entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Chromium launcher and configuration.
///
/// Use [`Launcher::builder()`] to create a configured launcher.
pub mod launcher;

/// DevTools protocol message types.
///
/// Internal module defining command/response/event structures.
pub mod protocol;

/// WebSocket transport layer.
///
/// Internal module handling the DevTools connection and endpoint
/// discovery.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{Browser, BrowserVersion, Page, PdfBuilder};

// Launcher types
pub use launcher::{ChromeOptions, Launcher, LauncherBuilder, Profile};

// Workflow types
pub use export::{ExpansionFilter, ExpansionRule, Mode};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{CommandId, FrameId, SessionId, SubscriptionId, TargetId};
