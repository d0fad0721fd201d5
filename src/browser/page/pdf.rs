//! PDF export methods.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{Command, PageCommand, PdfParams};

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// A4 paper width in inches.
const A4_WIDTH_IN: f64 = 8.27;

/// A4 paper height in inches.
const A4_HEIGHT_IN: f64 = 11.7;

/// Rendering a long page to PDF can take a while.
const PRINT_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// PdfBuilder
// ============================================================================

/// Builder for configuring and capturing PDF exports.
///
/// Uses the browser's print pipeline (`Page.printToPDF`), which paginates
/// the full document rather than snapshotting the viewport.
///
/// # Example
///
/// ```ignore
/// // A4 with half-inch margins, saved to disk
/// page.pdf()
///     .a4()
///     .margins_inches(0.5)
///     .print_background(true)
///     .save("page.pdf")
///     .await?;
///
/// // Raw bytes
/// let bytes = page.pdf().a4().capture_bytes().await?;
/// ```
pub struct PdfBuilder<'a> {
    page: &'a Page,
    params: PdfParams,
}

impl<'a> PdfBuilder<'a> {
    /// Creates a new PDF builder with protocol-default parameters.
    pub(crate) fn new(page: &'a Page) -> Self {
        Self {
            page,
            params: PdfParams::default(),
        }
    }

    /// Sets A4 paper size.
    #[must_use]
    pub fn a4(mut self) -> Self {
        self.params.paper_width = A4_WIDTH_IN;
        self.params.paper_height = A4_HEIGHT_IN;
        self
    }

    /// Sets the same margin on all four sides, in inches.
    #[must_use]
    pub fn margins_inches(mut self, inches: f64) -> Self {
        self.params.margin_top = inches;
        self.params.margin_bottom = inches;
        self.params.margin_left = inches;
        self.params.margin_right = inches;
        self
    }

    /// Prints background colors and images.
    #[must_use]
    pub fn print_background(mut self, enabled: bool) -> Self {
        self.params.print_background = enabled;
        self
    }

    /// Sets landscape orientation.
    #[must_use]
    pub fn landscape(mut self, enabled: bool) -> Self {
        self.params.landscape = enabled;
        self
    }

    /// Sets the page scale factor (0.1 to 2.0).
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.params.scale = scale;
        self
    }

    /// Renders the PDF and returns base64-encoded data.
    pub async fn capture(&self) -> Result<String> {
        debug!(
            target_id = %self.page.inner.target_id,
            paper_width = self.params.paper_width,
            paper_height = self.params.paper_height,
            "Printing page to PDF"
        );

        let command = Command::Page(PageCommand::PrintToPdf(self.params.clone()));
        let response = self
            .page
            .send_command_with_timeout(command, PRINT_TIMEOUT)
            .await?;

        let data = response
            .result
            .as_ref()
            .and_then(|v| v.get("data"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                let result_str = response
                    .result
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "null".to_string());
                Error::pdf(format!(
                    "Print response missing data field. Got: {}",
                    result_str
                ))
            })?;

        Ok(data.to_string())
    }

    /// Renders the PDF and returns raw bytes.
    pub async fn capture_bytes(&self) -> Result<Vec<u8>> {
        let base64_data = self.capture().await?;
        Base64Standard
            .decode(&base64_data)
            .map_err(|e| Error::pdf(format!("Failed to decode base64: {}", e)))
    }

    /// Renders the PDF and saves it to a file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.capture_bytes().await?;
        let path = path.as_ref();
        std::fs::write(path, bytes).map_err(Error::Io)?;
        debug!(path = %path.display(), "PDF saved");
        Ok(())
    }
}

// ============================================================================
// Page - PDF
// ============================================================================

impl Page {
    /// Creates a PDF builder for exporting the page.
    ///
    /// # Example
    ///
    /// ```ignore
    /// page.pdf().a4().margins_inches(0.5).save("out.pdf").await?;
    /// ```
    #[must_use]
    pub fn pdf(&self) -> PdfBuilder<'_> {
        PdfBuilder::new(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions() {
        assert!((A4_WIDTH_IN - 8.27).abs() < f64::EPSILON);
        assert!((A4_HEIGHT_IN - 11.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_print_timeout() {
        assert_eq!(PRINT_TIMEOUT.as_secs(), 60);
    }
}
