//! Chromium launcher module.
//!
//! This module provides the entry point for starting browsers.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Launcher`] | Factory for launching browsers |
//! | [`LauncherBuilder`] | Fluent configuration builder |
//! | [`ChromeOptions`] | Browser launch options |
//! | [`Profile`] | User data directory management |
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
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for launcher configuration.
pub mod builder;

/// Core launcher implementation.
pub mod core;

/// Chromium launch options.
pub mod options;

/// User data directory management.
pub mod profile;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::LauncherBuilder;
pub use self::core::Launcher;
pub use options::ChromeOptions;
pub use profile::Profile;
