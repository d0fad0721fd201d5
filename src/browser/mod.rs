//! Browser entities module.
//!
//! This module provides the core browser automation types:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Browser`] | Running browser (owns Chromium process + WebSocket) |
//! | [`Page`] | Page target driven over a flat CDP session |
//! | [`PdfBuilder`] | Print-to-PDF configuration and capture |
//!
//! # Example
//!
//! ```no_run
//! use resume_export::{ChromeOptions, Launcher, Result};
//!
//! # async fn example() -> Result<()> {
//! let launcher = Launcher::builder().build()?;
//! let browser = launcher.launch(ChromeOptions::hardened()).await?;
//!
//! let page = browser.new_page().await?;
//! page.navigate("https://example.com").await?;
//! let title = page.title().await?;
//!
//! browser.close().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Browser process handle and page factory.
pub mod core;

/// Page automation.
pub mod page;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::{Browser, BrowserVersion};
pub use page::{Page, PdfBuilder};
