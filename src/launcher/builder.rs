//! Builder pattern for launcher configuration.
//!
//! Provides a fluent API for configuring and creating [`Launcher`] instances.
//!
//! # Example
//!
//! ```no_run
//! use resume_export::Launcher;
//!
//! # fn example() -> resume_export::Result<()> {
//! let launcher = Launcher::builder()
//!     .binary("/usr/bin/chromium")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

use super::core::Launcher;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable that overrides binary discovery.
const CHROME_ENV: &str = "CHROME";

/// Well-known installation paths probed when no binary is configured.
const WELL_KNOWN_BINARIES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

// ============================================================================
// LauncherBuilder
// ============================================================================

/// Builder for configuring a [`Launcher`] instance.
///
/// Use [`Launcher::builder()`] to create a new builder.
///
/// # Binary Resolution
///
/// The Chromium binary is resolved in order:
///
/// 1. Path set with [`binary()`](Self::binary)
/// 2. The `CHROME` environment variable
/// 3. Well-known installation paths
#[derive(Debug, Default, Clone)]
pub struct LauncherBuilder {
    /// Path to the Chromium binary.
    binary: Option<PathBuf>,
}

// ============================================================================
// LauncherBuilder Implementation
// ============================================================================

impl LauncherBuilder {
    /// Creates a new launcher builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path to the Chromium binary executable.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to Chromium binary (e.g., "/usr/bin/chromium")
    #[inline]
    #[must_use]
    pub fn binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Builds the launcher with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::ChromeNotFound`] if a configured binary path doesn't exist
    /// - [`Error::Config`] if no binary can be resolved
    pub fn build(self) -> Result<Launcher> {
        let binary = self.resolve_binary()?;
        debug!(binary = %binary.display(), "Resolved Chromium binary");

        Ok(Launcher::new(binary))
    }
}

// ============================================================================
// Binary Resolution
// ============================================================================

impl LauncherBuilder {
    /// Resolves the Chromium binary path.
    fn resolve_binary(&self) -> Result<PathBuf> {
        if let Some(binary) = &self.binary {
            if !binary.exists() {
                return Err(Error::chrome_not_found(binary));
            }
            return Ok(binary.clone());
        }

        if let Ok(env_path) = std::env::var(CHROME_ENV) {
            let path = PathBuf::from(env_path);
            if !path.exists() {
                return Err(Error::chrome_not_found(path));
            }
            return Ok(path);
        }

        for candidate in WELL_KNOWN_BINARIES {
            let path = Path::new(candidate);
            if path.exists() {
                return Ok(path.to_path_buf());
            }
        }

        Err(Error::config(
            "Chromium binary not found. Use .binary() to set it or set the CHROME \
             environment variable.\n\
             Example: Launcher::builder().binary(\"/usr/bin/chromium\")",
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
