//! User data directory management.
//!
//! This module handles the creation of the Chromium user data directory,
//! which doubles as the rendezvous point for endpoint discovery: the
//! browser writes `DevToolsActivePort` into it on startup.
//!
//! # Example
//!
//! ```no_run
//! use resume_export::launcher::Profile;
//!
//! # fn example() -> resume_export::Result<()> {
//! let profile = Profile::new_temp()?;
//! println!("User data dir at: {}", profile.path().display());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Profile
// ============================================================================

/// A Chromium user data directory.
///
/// Profiles can be temporary (auto-cleanup) or persistent (user-managed).
///
/// # Temporary Profiles
///
/// Created with [`Profile::new_temp()`], these are automatically deleted
/// when the `Profile` is dropped.
///
/// # Persistent Profiles
///
/// Created with [`Profile::from_path()`], these persist after the program
/// exits.
pub struct Profile {
    /// Optional temporary directory handle (keeps temp dir alive).
    _temp_dir: Option<TempDir>,

    /// Path to the user data directory.
    path: PathBuf,
}

// ============================================================================
// Profile - Constructors
// ============================================================================

impl Profile {
    /// Creates a new temporary user data directory.
    ///
    /// The directory is created in the system temp directory with a unique
    /// name. It is automatically deleted when the Profile is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new_temp() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("resume-export-")
            .map_err(|e| Error::config(format!("Failed to create temp user data dir: {e}")))?;

        let path = temp_dir.path().to_path_buf();
        debug!(path = %path.display(), "Created temporary user data dir");

        Ok(Self {
            _temp_dir: Some(temp_dir),
            path,
        })
    }

    /// Uses an existing user data directory.
    ///
    /// If the directory doesn't exist, it is created.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the user data directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            fs::create_dir_all(&path).map_err(|e| {
                Error::config(format!(
                    "Failed to create user data dir at {}: {e}",
                    path.display()
                ))
            })?;
            debug!(path = %path.display(), "Created user data dir");
        } else {
            debug!(path = %path.display(), "Using existing user data dir");
        }

        Ok(Self {
            _temp_dir: None,
            path,
        })
    }
}

// ============================================================================
// Profile - Accessors
// ============================================================================

impl Profile {
    /// Returns the path to the user data directory.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if this is a temporary profile.
    #[inline]
    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        self._temp_dir.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_temp_creates_directory() {
        let profile = Profile::new_temp().expect("create temp profile");
        assert!(profile.path().exists());
        assert!(profile.is_temporary());
    }

    #[test]
    fn test_temp_profile_cleanup_on_drop() {
        let path = {
            let profile = Profile::new_temp().expect("create temp profile");
            profile.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_from_path_creates_missing_directory() {
        let base = tempfile::tempdir().expect("tempdir");
        let target = base.path().join("nested").join("profile");

        let profile = Profile::from_path(&target).expect("create profile");
        assert!(profile.path().exists());
        assert!(!profile.is_temporary());
    }

    #[test]
    fn test_from_path_uses_existing_directory() {
        let base = tempfile::tempdir().expect("tempdir");

        let profile = Profile::from_path(base.path()).expect("use profile");
        assert_eq!(profile.path(), base.path());
    }

    #[test]
    fn test_persistent_profile_survives_drop() {
        let base = tempfile::tempdir().expect("tempdir");
        let target = base.path().join("persistent");

        {
            let _profile = Profile::from_path(&target).expect("create profile");
        }
        assert!(target.exists());
    }
}
