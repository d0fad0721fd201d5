//! Chromium command-line options and configuration.
//!
//! Provides a type-safe interface for configuring Chromium process options
//! such as the hardened argument set, window state, and extra arguments.
//!
//! # Example
//!
//! ```ignore
//! use resume_export::ChromeOptions;
//!
//! let options = ChromeOptions::hardened()
//!     .with_window_size(1366, 768);
//!
//! let args = options.to_args();
//! // ["--no-sandbox", "--disable-setuid-sandbox", ..., "--window-size=1366,768"]
//! ```

// ============================================================================
// Constants
// ============================================================================

/// Stability and stealth arguments applied in hardened mode.
///
/// The set disables the automation fingerprint (`AutomationControlled`),
/// background throttling, and every auxiliary service that could phone
/// home or steal focus during an export run.
const HARDENED_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-blink-features=AutomationControlled",
    "--disable-features=VizDisplayCompositor",
    "--disable-web-security",
    "--disable-features=TranslateUI",
    "--disable-ipc-flooding-protection",
    "--disable-renderer-backgrounding",
    "--disable-backgrounding-occluded-windows",
    "--disable-client-side-phishing-detection",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-default-apps",
    "--disable-popup-blocking",
    "--disable-translate",
    "--disable-background-timer-throttling",
    "--disable-field-trial-config",
    "--disable-back-forward-cache",
    "--disable-background-networking",
    "--enable-features=NetworkService,NetworkServiceInProcess",
    "--disable-component-update",
    "--disable-domain-reliability",
    "--disable-extensions",
    "--disable-print-preview",
    "--disable-speech-api",
    "--disable-sync",
    "--hide-scrollbars",
    "--mute-audio",
    "--no-pings",
    "--use-mock-keychain",
    "--disable-gpu",
];

// ============================================================================
// ChromeOptions
// ============================================================================

/// Chromium process configuration options.
///
/// Controls how Chromium is launched, including the hardened argument set,
/// display mode, window dimensions, and additional command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromeOptions {
    /// Run Chromium without a GUI (headless mode).
    pub headless: bool,

    /// Apply the full hardened argument set.
    pub hardened: bool,

    /// Start with a maximized window.
    pub start_maximized: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

// ============================================================================
// Constructors
// ============================================================================

impl ChromeOptions {
    /// Creates a new options instance with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headless: false,
            hardened: false,
            start_maximized: false,
            window_size: None,
            extra_args: Vec::new(),
        }
    }

    /// Creates options with the hardened argument set enabled.
    #[inline]
    #[must_use]
    pub fn hardened() -> Self {
        Self {
            hardened: true,
            ..Default::default()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ChromeOptions {
    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Enables the hardened argument set.
    #[inline]
    #[must_use]
    pub fn with_hardened(mut self) -> Self {
        self.hardened = true;
        self
    }

    /// Starts the browser maximized.
    #[inline]
    #[must_use]
    pub fn with_start_maximized(mut self) -> Self {
        self.start_maximized = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl ChromeOptions {
    /// Converts options to Chromium command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(HARDENED_ARGS.len() + self.extra_args.len() + 3);

        if self.hardened {
            args.extend(HARDENED_ARGS.iter().map(ToString::to_string));
        }

        if self.headless {
            args.push("--headless=new".to_string());
        }

        if self.start_maximized {
            args.push("--start-maximized".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push(format!("--window-size={width},{height}"));
        }

        args.extend(self.extra_args.clone());
        args
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err("Window dimensions must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Returns `true` if the hardened argument set is enabled.
    #[inline]
    #[must_use]
    pub const fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_default() {
        let options = ChromeOptions::new();
        assert!(!options.headless);
        assert!(!options.hardened);
        assert!(!options.start_maximized);
        assert!(options.window_size.is_none());
        assert!(options.extra_args.is_empty());
    }

    #[test]
    fn test_hardened_constructor() {
        let options = ChromeOptions::hardened();
        assert!(options.hardened);
        assert!(options.is_hardened());
        assert!(!options.is_headless());
    }

    #[test]
    fn test_builder_chain() {
        let options = ChromeOptions::new()
            .with_hardened()
            .with_window_size(1366, 768)
            .with_arg("--custom");

        assert!(options.hardened);
        assert_eq!(options.window_size, Some((1366, 768)));
        assert_eq!(options.extra_args, vec!["--custom".to_string()]);
    }

    #[test]
    fn test_to_args_plain_is_empty() {
        let options = ChromeOptions::new();
        assert!(options.to_args().is_empty());
    }

    #[test]
    fn test_to_args_hardened_set() {
        let args = ChromeOptions::hardened().to_args();

        assert_eq!(args.len(), HARDENED_ARGS.len());
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--disable-blink-features=AutomationControlled".to_string()));
        assert!(args.contains(&"--disable-gpu".to_string()));
        assert!(!args.contains(&"--enable-automation".to_string()));
    }

    #[test]
    fn test_to_args_not_hardened_excludes_set() {
        let args = ChromeOptions::new().with_start_maximized().to_args();

        assert_eq!(args, vec!["--start-maximized".to_string()]);
    }

    #[test]
    fn test_to_args_window_size() {
        let args = ChromeOptions::new().with_window_size(800, 600).to_args();
        assert!(args.contains(&"--window-size=800,600".to_string()));
    }

    #[test]
    fn test_to_args_headless() {
        let args = ChromeOptions::new().with_headless().to_args();
        assert!(args.contains(&"--headless=new".to_string()));
    }

    #[test]
    fn test_with_args_multiple() {
        let options = ChromeOptions::new().with_args(["--arg1", "--arg2"]);
        assert_eq!(options.extra_args.len(), 2);
    }

    #[test]
    fn test_validate_valid() {
        let options = ChromeOptions::new().with_window_size(800, 600);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_width() {
        let options = ChromeOptions::new().with_window_size(0, 600);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_zero_height() {
        let options = ChromeOptions::new().with_window_size(800, 0);
        assert!(options.validate().is_err());
    }
}
