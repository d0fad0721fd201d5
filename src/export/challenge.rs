//! Bot-protection challenge detection.
//!
//! Cloudflare serves an interstitial "Just a moment..." page before the
//! real profile when it suspects automation. Detection is heuristic:
//! the challenge announces itself in the page title and, for the
//! JS-challenge variant, in the URL.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::browser::Page;
use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Title fragments that mark a challenge interstitial.
const CHALLENGE_TITLES: &[&str] = &["Just a moment", "Cloudflare"];

/// URL fragment of the JS-challenge redirect.
const CHALLENGE_URL_FRAGMENT: &str = "cf-browser-verification";

/// URL fragment the real profile page must carry.
const PROFILE_URL_FRAGMENT: &str = "talent.toptal.com/resume";

/// How long to wait for a detected challenge to clear on its own.
const CHALLENGE_WAIT: Duration = Duration::from_secs(30);

/// Title poll cadence during the challenge wait.
const CHALLENGE_POLL_INTERVAL: Duration = Duration::from_millis(500);

// ============================================================================
// Detection
// ============================================================================

/// Returns `true` when the title belongs to a challenge interstitial.
#[must_use]
pub fn is_challenge_title(title: &str) -> bool {
    CHALLENGE_TITLES.iter().any(|marker| title.contains(marker))
}

/// Returns `true` when title or URL indicate a challenge page.
#[must_use]
pub fn is_challenge(title: &str, url: &str) -> bool {
    is_challenge_title(title) || url.contains(CHALLENGE_URL_FRAGMENT)
}

/// Returns `true` when the URL is the profile page and not some
/// interstitial or block page the protection parked us on.
#[must_use]
pub fn is_profile_url(url: &str) -> bool {
    url.contains(PROFILE_URL_FRAGMENT)
}

// ============================================================================
// Challenge Wait
// ============================================================================

/// Waits for a detected challenge to clear.
///
/// Polls the page title until it no longer looks like a challenge, for
/// at most 30 seconds. A timeout is not an error: the JS challenge
/// sometimes passes without updating the title, so the caller proceeds
/// and relies on the final URL check to decide whether the page was
/// actually reached.
///
/// Returns `true` if the title cleared within the window.
pub async fn wait_for_clear(page: &Page) -> Result<bool> {
    info!("Cloudflare challenge detected, waiting for completion...");

    let deadline = Instant::now() + CHALLENGE_WAIT;
    loop {
        let title = page.title().await?;
        if !is_challenge_title(&title) {
            debug!(title = %title, "Challenge title cleared");
            return Ok(true);
        }
        if Instant::now() >= deadline {
            warn!("Cloudflare challenge may still be active, proceeding anyway...");
            return Ok(false);
        }
        sleep(CHALLENGE_POLL_INTERVAL).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_title_markers() {
        assert!(is_challenge_title("Just a moment..."));
        assert!(is_challenge_title("Attention Required! | Cloudflare"));
        assert!(!is_challenge_title("Guilherme Natal | Toptal"));
        assert!(!is_challenge_title(""));
    }

    #[test]
    fn test_challenge_url_fragment() {
        assert!(is_challenge(
            "Loading",
            "https://talent.toptal.com/cdn-cgi/cf-browser-verification"
        ));
        assert!(!is_challenge(
            "Guilherme Natal",
            "https://talent.toptal.com/resume/developers/guilherme-natal"
        ));
    }

    #[test]
    fn test_challenge_title_wins_over_url() {
        assert!(is_challenge("Just a moment...", "https://example.com"));
    }

    #[test]
    fn test_profile_url_check() {
        assert!(is_profile_url(
            "https://talent.toptal.com/resume/developers/guilherme-natal"
        ));
        assert!(is_profile_url(
            "https://talent.toptal.com/resume/developers/guilherme-natal?tab=skills"
        ));
        assert!(!is_profile_url("https://talent.toptal.com/"));
        assert!(!is_profile_url("https://challenges.cloudflare.com/turnstile"));
    }

    #[test]
    fn test_wait_bounds() {
        assert_eq!(CHALLENGE_WAIT.as_secs(), 30);
        assert_eq!(CHALLENGE_POLL_INTERVAL.as_millis(), 500);
    }
}
