//! Profile-to-PDF export workflow.
//!
//! One linear sequence of browser steps: navigate, wait out bot
//! protection, dismiss the cookie banner, strip layout chrome, scroll
//! lazy content into existence, expand every collapsed section, and
//! print the result as a multi-page PDF.
//!
//! # Modes
//!
//! | Mode | Challenge handling | Output file |
//! |------|--------------------|-------------|
//! | [`Mode::Automatic`] | Hardened launch, bounded wait for the challenge to clear | `guilherme-natal-resume-complete.pdf` |
//! | [`Mode::Manual`] | Human navigates and clears the challenge, then presses Enter | `guilherme-natal-resume-manual-complete.pdf` |
//!
//! # Example
//!
//! ```no_run
//! use resume_export::export::{self, Mode};
//!
//! # async fn example() -> resume_export::Result<()> {
//! export::run(Mode::Automatic).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Bot-protection challenge detection.
pub mod challenge;

/// Expansion button detection.
pub mod expand;

pub use expand::{ExpansionFilter, ExpansionRule};

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::browser::{Browser, Page};
use crate::error::{Error, Result};
use crate::launcher::{ChromeOptions, Launcher};

use expand::{CLICKABLE_SELECTOR, WIDE_SELECTOR};

// ============================================================================
// Constants
// ============================================================================

/// The profile page to export.
pub const RESUME_URL: &str = "https://talent.toptal.com/resume/developers/guilherme-natal";

/// Output file for automatic mode, relative to the working directory.
pub const AUTOMATIC_PDF_FILENAME: &str = "guilherme-natal-resume-complete.pdf";

/// Output file for manual mode.
pub const MANUAL_PDF_FILENAME: &str = "guilherme-natal-resume-manual-complete.pdf";

/// Desktop Chrome user agent presented in automatic mode.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Init script that removes the `navigator.webdriver` automation marker
/// before any page script can observe it.
const WEBDRIVER_CONCEAL_SCRIPT: &str = r#"Object.defineProperty(navigator, "webdriver", {
    get: () => undefined,
});"#;

/// Cookie consent banner shown on first visit.
const COOKIE_BANNER_SELECTOR: &str = r#"[data-testid="Banner:PRIVACY_SHIELD"]"#;

/// The banner's dismiss button.
const COOKIE_BANNER_BUTTON: &str = r#"[data-testid="Banner:PRIVACY_SHIELD"] button"#;

/// Layout chrome removed before printing: sticky footer, floating MUI
/// controls, and the tab strip, none of which belong in a PDF.
const LAYOUT_SELECTORS: &[&str] = &[
    ".Layout___StyledPageFooter-sc-1uaeije-5",
    ".mui-fixed",
    r#"[data-testid="resume-page-tabs"]"#,
];

/// Viewport emulated in automatic mode.
const VIEWPORT: (u32, u32) = (1366, 768);

/// Settle time after DOMContentLoaded before inspecting the page.
const SETTLE_AFTER_NAVIGATION: Duration = Duration::from_secs(5);

/// Settle time after the challenge wait.
const SETTLE_AFTER_CHALLENGE: Duration = Duration::from_secs(3);

/// How long to wait for the cookie banner to show up.
const COOKIE_BANNER_WAIT: Duration = Duration::from_secs(5);

/// Settle time after dismissing the cookie banner.
const SETTLE_AFTER_COOKIE: Duration = Duration::from_secs(1);

/// Wait for lazily loaded content after a full scroll.
const LAZY_CONTENT_WAIT: Duration = Duration::from_secs(3);

/// Settle time after scrolling back to the top.
const SETTLE_AFTER_TOP: Duration = Duration::from_secs(1);

/// Wait for expanded sections to render after the first click pass.
const WAIT_AFTER_FIRST_PASS: Duration = Duration::from_secs(4);

/// Wait for expanded sections to render after the second click pass.
const WAIT_AFTER_SECOND_PASS: Duration = Duration::from_secs(3);

/// Slower cadence for the re-scroll over freshly expanded content.
const RESCROLL_INTERVAL_MS: u64 = 150;

/// How long the browser stays open after an automatic run so a human
/// can step in.
const KEEP_OPEN_WINDOW: Duration = Duration::from_secs(30);

// ============================================================================
// Mode
// ============================================================================

/// Operating mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Hardened launch, automatic challenge handling.
    Automatic,
    /// Visible browser, human clears the challenge.
    Manual,
}

impl Mode {
    /// Parses the mode argument. `"2"` selects manual mode; anything
    /// else, including no argument at all, selects automatic mode.
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("2") => Self::Manual,
            _ => Self::Automatic,
        }
    }

    /// Human-readable mode name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Automatic => "Automatic bypass",
            Self::Manual => "Manual bypass",
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Runs the export workflow in the given mode.
///
/// # Errors
///
/// Returns an error when the browser cannot be launched, the profile
/// page cannot be reached ([`Error::PageBlocked`] when bot protection is
/// the suspected cause), or the PDF cannot be written.
pub async fn run(mode: Mode) -> Result<()> {
    match mode {
        Mode::Automatic => run_automatic().await,
        Mode::Manual => run_manual().await,
    }
}

// ============================================================================
// Automatic Mode
// ============================================================================

/// Hardened launch, automatic challenge handling, keep-open window.
async fn run_automatic() -> Result<()> {
    let launcher = Launcher::builder().build()?;
    let browser = launcher.launch(ChromeOptions::hardened()).await?;

    let result = automatic_pipeline(&browser).await;

    // The window stays open after success and failure alike, so a human
    // can solve whatever the run could not.
    info!("Browser will remain open for 30 seconds for manual intervention...");
    sleep(KEEP_OPEN_WINDOW).await;

    let closed = browser.close().await;
    result.and(closed)
}

/// The full automatic sequence against a fresh page.
async fn automatic_pipeline(browser: &Browser) -> Result<()> {
    let page = browser.new_page().await?;
    harden_page(&page).await?;

    info!("Navigating to the resume page...");
    page.navigate(RESUME_URL).await?;

    info!("Page loaded, checking for Cloudflare challenge...");
    sleep(SETTLE_AFTER_NAVIGATION).await;

    let title = page.title().await?;
    let url = page.url().await?;
    info!(title = %title, url = %url, "Current page");

    if challenge::is_challenge(&title, &url) {
        challenge::wait_for_clear(&page).await?;
        sleep(SETTLE_AFTER_CHALLENGE).await;
    }

    let final_url = page.url().await?;
    if !challenge::is_profile_url(&final_url) {
        return Err(Error::page_blocked(final_url));
    }

    info!("Successfully bypassed protection, handling page interactions...");
    dismiss_cookie_banner(&page, true).await?;
    remove_layout_elements(&page).await?;
    scroll_pass(&page).await?;
    expand_sections(&page, CLICKABLE_SELECTOR, &ExpansionFilter::first_pass()).await?;

    info!("All expansions complete, generating multi-page PDF...");
    print_pdf(&page, AUTOMATIC_PDF_FILENAME).await
}

// ============================================================================
// Manual Mode
// ============================================================================

/// Visible browser; the human navigates and clears the challenge.
async fn run_manual() -> Result<()> {
    let launcher = Launcher::builder().build()?;
    let browser = launcher
        .launch(ChromeOptions::new().with_start_maximized())
        .await?;
    let page = browser.new_page().await?;

    println!("Browser opened. Please manually:");
    println!("1. Navigate to: {RESUME_URL}");
    println!("2. Complete any Cloudflare challenges");
    println!("3. Wait for the resume page to load completely");
    println!("4. Press Enter in this terminal when ready...");
    wait_for_enter().await?;

    info!("Processing page...");
    dismiss_cookie_banner(&page, false).await?;
    scroll_pass(&page).await?;
    expand_sections(&page, WIDE_SELECTOR, &ExpansionFilter::manual_first_pass()).await?;

    info!("Generating multi-page PDF...");
    print_pdf(&page, MANUAL_PDF_FILENAME).await?;

    browser.close().await
}

/// Blocks until the user presses Enter.
///
/// A closed stdin reads as EOF and proceeds rather than hanging the
/// run.
async fn wait_for_enter() -> Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(())
}

// ============================================================================
// Shared Steps
// ============================================================================

/// Conceals automation markers and presents a realistic browsing
/// fingerprint before the first navigation.
async fn harden_page(page: &Page) -> Result<()> {
    page.add_init_script(WEBDRIVER_CONCEAL_SCRIPT).await?;
    page.set_user_agent(DESKTOP_USER_AGENT).await?;
    page.set_extra_http_headers(extra_headers()).await?;
    page.set_viewport(VIEWPORT.0, VIEWPORT.1).await?;
    Ok(())
}

/// Headers a real desktop Chrome sends on a top-level navigation.
fn extra_headers() -> BTreeMap<String, String> {
    [
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Accept-Encoding", "gzip, deflate, br"),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "none"),
        ("Sec-Fetch-User", "?1"),
        ("Cache-Control", "max-age=0"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

/// Dismisses the cookie consent banner when present.
///
/// Automatic mode waits up to five seconds for the banner to render;
/// manual mode checks once, since the human has already been on the
/// page for a while.
async fn dismiss_cookie_banner(page: &Page, wait: bool) -> Result<()> {
    info!("Looking for cookie banner...");

    let present = if wait {
        page.wait_for_selector(COOKIE_BANNER_SELECTOR, COOKIE_BANNER_WAIT)
            .await?
    } else {
        page.query_exists(COOKIE_BANNER_SELECTOR).await?
    };

    if !present {
        info!("No cookie banner found or already dismissed");
        return Ok(());
    }

    info!("Cookie banner found, dismissing...");
    page.click_first(COOKIE_BANNER_BUTTON).await?;
    info!("Cookie banner dismissed");
    sleep(SETTLE_AFTER_COOKIE).await;
    Ok(())
}

/// Strips layout chrome that would repeat on every printed page.
async fn remove_layout_elements(page: &Page) -> Result<()> {
    for selector in LAYOUT_SELECTORS {
        let removed = page.remove_first(selector).await?;
        debug!(selector = %selector, removed, "Layout element removal");
    }
    Ok(())
}

/// One full incremental scroll, a lazy-content wait, and a return to
/// the top.
async fn scroll_pass(page: &Page) -> Result<()> {
    info!("Scrolling to load all content...");
    page.scroll_to_bottom().await?;

    info!("Finished scrolling, waiting for lazy content to load...");
    sleep(LAZY_CONTENT_WAIT).await;

    page.scroll_to_top().await?;
    sleep(SETTLE_AFTER_TOP).await;
    Ok(())
}

/// Expands every collapsed section the filter recognizes.
///
/// Two passes: the first over `first_selector`, then, when anything was
/// clicked, a "+N more"-only pass over the wide selector to catch
/// counters that only appear once their section is open. Finishes by
/// hiding "Show Less" controls and re-scrolling the grown page.
async fn expand_sections(
    page: &Page,
    first_selector: &str,
    first_filter: &ExpansionFilter,
) -> Result<()> {
    info!(r#"Looking for "See More" buttons to expand all content..."#);

    let clicked = expansion_pass(page, first_selector, first_filter).await?;
    if clicked.is_empty() {
        info!("No expansion buttons found or all content already expanded");
        return Ok(());
    }
    info!(count = clicked.len(), buttons = ?clicked, "Clicked expansion buttons");
    sleep(WAIT_AFTER_FIRST_PASS).await;

    info!("Looking for additional expansion buttons...");
    let second_pass =
        expansion_pass(page, WIDE_SELECTOR, &ExpansionFilter::second_pass()).await?;
    if !second_pass.is_empty() {
        info!(
            count = second_pass.len(),
            buttons = ?second_pass,
            "Second pass clicked more buttons"
        );
        sleep(WAIT_AFTER_SECOND_PASS).await;
    }

    let hidden = page.hide_spans_containing("Show Less").await?;
    debug!(hidden, r#"Hid "Show Less" controls"#);

    info!("Re-scrolling to load all newly expanded content...");
    page.scroll_to_bottom_with_interval(RESCROLL_INTERVAL_MS).await?;
    sleep(LAZY_CONTENT_WAIT).await;
    page.scroll_to_top().await?;
    sleep(SETTLE_AFTER_TOP).await;
    Ok(())
}

/// Collects candidates, selects the ones the filter recognizes, and
/// clicks them by index. Returns the texts actually clicked.
async fn expansion_pass(
    page: &Page,
    selector: &str,
    filter: &ExpansionFilter,
) -> Result<Vec<String>> {
    let candidates = page.collect_candidates(selector).await?;
    let indices = filter.select(&candidates);
    if indices.is_empty() {
        return Ok(Vec::new());
    }
    page.click_candidates(&indices).await
}

/// Prints the page as an A4 multi-page PDF with half-inch margins.
async fn print_pdf(page: &Page, filename: &str) -> Result<()> {
    page.pdf()
        .a4()
        .margins_inches(0.5)
        .print_background(true)
        .save(filename)
        .await?;
    info!(path = %filename, "Multi-page resume PDF saved");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_arg() {
        assert_eq!(Mode::from_arg(None), Mode::Automatic);
        assert_eq!(Mode::from_arg(Some("1")), Mode::Automatic);
        assert_eq!(Mode::from_arg(Some("2")), Mode::Manual);
        assert_eq!(Mode::from_arg(Some("manual")), Mode::Automatic);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Automatic.label(), "Automatic bypass");
        assert_eq!(Mode::Manual.label(), "Manual bypass");
    }

    #[test]
    fn test_resume_url_is_the_profile_page() {
        assert!(challenge::is_profile_url(RESUME_URL));
        assert!(RESUME_URL.starts_with("https://"));
    }

    #[test]
    fn test_output_filenames_differ_by_mode() {
        assert_ne!(AUTOMATIC_PDF_FILENAME, MANUAL_PDF_FILENAME);
        assert!(AUTOMATIC_PDF_FILENAME.ends_with(".pdf"));
        assert!(MANUAL_PDF_FILENAME.ends_with(".pdf"));
    }

    #[test]
    fn test_extra_headers_catalog() {
        let headers = extra_headers();
        assert_eq!(headers.len(), 10);
        assert_eq!(headers["Accept-Language"], "en-US,en;q=0.9");
        assert_eq!(headers["Upgrade-Insecure-Requests"], "1");
        assert_eq!(headers["Sec-Fetch-Mode"], "navigate");
    }

    #[test]
    fn test_user_agent_is_desktop_chrome() {
        assert!(DESKTOP_USER_AGENT.contains("Chrome/120"));
        assert!(DESKTOP_USER_AGENT.contains("Windows NT 10.0"));
        assert!(!DESKTOP_USER_AGENT.contains("Headless"));
    }

    #[test]
    fn test_conceal_script_targets_webdriver_flag() {
        assert!(WEBDRIVER_CONCEAL_SCRIPT.contains("navigator"));
        assert!(WEBDRIVER_CONCEAL_SCRIPT.contains(r#""webdriver""#));
        assert!(WEBDRIVER_CONCEAL_SCRIPT.contains("undefined"));
    }

    #[test]
    fn test_layout_selectors() {
        assert_eq!(LAYOUT_SELECTORS.len(), 3);
        assert!(LAYOUT_SELECTORS.contains(&".mui-fixed"));
    }

    #[test]
    fn test_workflow_timings() {
        assert_eq!(SETTLE_AFTER_NAVIGATION.as_secs(), 5);
        assert_eq!(WAIT_AFTER_FIRST_PASS.as_secs(), 4);
        assert_eq!(WAIT_AFTER_SECOND_PASS.as_secs(), 3);
        assert_eq!(KEEP_OPEN_WINDOW.as_secs(), 30);
        assert_eq!(RESCROLL_INTERVAL_MS, 150);
    }
}
