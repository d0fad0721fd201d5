//! Browser page automation and control.
//!
//! Each [`Page`] represents one page target driven over a flat CDP
//! session.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Page struct, accessors, command plumbing |
//! | `navigation` | URL navigation, title/URL queries |
//! | `script` | JavaScript evaluation, init scripts |
//! | `emulation` | User agent, header, viewport overrides |
//! | `dom` | Selector queries, clicks, removals, candidates |
//! | `scroll` | Incremental scroll control |
//! | `pdf` | PDF export |
//!
//! # Example
//!
//! ```ignore
//! let page = browser.new_page().await?;
//!
//! // Navigate and inspect
//! page.navigate("https://example.com").await?;
//! let title = page.title().await?;
//!
//! // Expand collapsed sections
//! let texts = page.collect_candidates("button, a").await?;
//! page.click_candidates(&[0, 2]).await?;
//!
//! // Export
//! page.pdf().a4().margins_inches(0.5).save("page.pdf").await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod core;
mod dom;
mod emulation;
mod navigation;
mod pdf;
mod script;
mod scroll;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::Page;
pub use pdf::PdfBuilder;
