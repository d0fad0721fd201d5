//! Command definitions organized by DevTools domain.
//!
//! Commands serialize to the wire `Domain.methodName` strings the browser
//! expects; only the handful of domains this crate drives are modeled.
//!
//! # Command Domains
//!
//! | Domain | Commands |
//! |--------|----------|
//! | `Target` | Create, attach, close page targets |
//! | `Browser` | Version, shutdown |
//! | `Page` | Enable, navigate, init scripts, print to PDF |
//! | `Runtime` | JavaScript evaluation |
//! | `Network` | Enable, user agent override, extra headers |
//! | `Emulation` | Device metrics (viewport) |

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::TargetId;

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by domain.
///
/// This enum wraps domain-specific command enums for unified serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Target domain commands.
    Target(TargetCommand),
    /// Browser domain commands.
    Browser(BrowserCommand),
    /// Page domain commands.
    Page(PageCommand),
    /// Runtime domain commands.
    Runtime(RuntimeCommand),
    /// Network domain commands.
    Network(NetworkCommand),
    /// Emulation domain commands.
    Emulation(EmulationCommand),
}

// ============================================================================
// Target Commands
// ============================================================================

/// Target domain commands for page lifecycle management.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum TargetCommand {
    /// Open a new page target.
    #[serde(rename = "Target.createTarget")]
    CreateTarget {
        /// Initial URL for the new page.
        url: String,
    },

    /// Attach to a target, returning a session id.
    #[serde(rename = "Target.attachToTarget")]
    AttachToTarget {
        /// Target to attach to.
        #[serde(rename = "targetId")]
        target_id: TargetId,
        /// Use flat session mode (session id in the message envelope).
        flatten: bool,
    },

    /// Close a target.
    #[serde(rename = "Target.closeTarget")]
    CloseTarget {
        /// Target to close.
        #[serde(rename = "targetId")]
        target_id: TargetId,
    },
}

// ============================================================================
// Browser Commands
// ============================================================================

/// Browser domain commands for process-level control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum BrowserCommand {
    /// Get browser version metadata.
    #[serde(rename = "Browser.getVersion")]
    GetVersion,

    /// Gracefully shut the browser down.
    #[serde(rename = "Browser.close")]
    Close,
}

// ============================================================================
// Page Commands
// ============================================================================

/// Page domain commands for navigation and printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum PageCommand {
    /// Enable page events (load/DOMContentLoaded notifications).
    #[serde(rename = "Page.enable")]
    Enable,

    /// Navigate to URL.
    #[serde(rename = "Page.navigate")]
    Navigate {
        /// URL to navigate to.
        url: String,
    },

    /// Register a script evaluated in every new document before its own
    /// scripts run.
    #[serde(rename = "Page.addScriptToEvaluateOnNewDocument")]
    AddScriptToEvaluateOnNewDocument {
        /// Script source.
        source: String,
    },

    /// Print the page to PDF.
    #[serde(rename = "Page.printToPDF")]
    PrintToPdf(PdfParams),
}

// ============================================================================
// Runtime Commands
// ============================================================================

/// Runtime domain commands for JavaScript execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum RuntimeCommand {
    /// Evaluate an expression in the page.
    #[serde(rename = "Runtime.evaluate")]
    Evaluate {
        /// JavaScript expression.
        expression: String,
        /// Serialize the result by value instead of handing back an object id.
        #[serde(rename = "returnByValue")]
        return_by_value: bool,
        /// Resolve returned promises before responding.
        #[serde(rename = "awaitPromise")]
        await_promise: bool,
        /// Evaluate as if triggered by user interaction.
        #[serde(rename = "userGesture")]
        user_gesture: bool,
    },
}

// ============================================================================
// Network Commands
// ============================================================================

/// Network domain commands for request shaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum NetworkCommand {
    /// Enable network tracking (required before overrides apply).
    #[serde(rename = "Network.enable")]
    Enable,

    /// Override the User-Agent header.
    #[serde(rename = "Network.setUserAgentOverride")]
    SetUserAgentOverride {
        /// User agent string to send.
        #[serde(rename = "userAgent")]
        user_agent: String,
    },

    /// Attach extra headers to every request.
    #[serde(rename = "Network.setExtraHTTPHeaders")]
    SetExtraHttpHeaders {
        /// Header name/value pairs.
        headers: BTreeMap<String, String>,
    },
}

// ============================================================================
// Emulation Commands
// ============================================================================

/// Emulation domain commands for viewport control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum EmulationCommand {
    /// Override device metrics (viewport size and scale).
    #[serde(rename = "Emulation.setDeviceMetricsOverride")]
    SetDeviceMetricsOverride {
        /// Viewport width in CSS pixels.
        width: u32,
        /// Viewport height in CSS pixels.
        height: u32,
        /// Device scale factor.
        #[serde(rename = "deviceScaleFactor")]
        device_scale_factor: f64,
        /// Emulate a mobile device.
        mobile: bool,
    },
}

// ============================================================================
// PdfParams
// ============================================================================

/// Print parameters for `Page.printToPDF`.
///
/// Dimensions and margins are in inches. Defaults match the protocol's
/// documented defaults (US Letter, 1 cm margins); callers normally go through
/// the page's PDF builder which applies the A4 layout this program ships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfParams {
    /// Landscape orientation.
    pub landscape: bool,

    /// Print header and footer bands.
    #[serde(rename = "displayHeaderFooter")]
    pub display_header_footer: bool,

    /// Print background colors and images.
    #[serde(rename = "printBackground")]
    pub print_background: bool,

    /// Page scale factor, 0.1 to 2.0.
    pub scale: f64,

    /// Paper width in inches.
    #[serde(rename = "paperWidth")]
    pub paper_width: f64,

    /// Paper height in inches.
    #[serde(rename = "paperHeight")]
    pub paper_height: f64,

    /// Top margin in inches.
    #[serde(rename = "marginTop")]
    pub margin_top: f64,

    /// Bottom margin in inches.
    #[serde(rename = "marginBottom")]
    pub margin_bottom: f64,

    /// Left margin in inches.
    #[serde(rename = "marginLeft")]
    pub margin_left: f64,

    /// Right margin in inches.
    #[serde(rename = "marginRight")]
    pub margin_right: f64,

    /// Honor any CSS `@page` size over the paper size given here.
    #[serde(rename = "preferCSSPageSize")]
    pub prefer_css_page_size: bool,
}

impl Default for PdfParams {
    fn default() -> Self {
        Self {
            landscape: false,
            display_header_footer: false,
            print_background: false,
            scale: 1.0,
            paper_width: 8.5,
            paper_height: 11.0,
            margin_top: 0.4,
            margin_bottom: 0.4,
            margin_left: 0.4,
            margin_right: 0.4,
            prefer_css_page_size: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_navigate() {
        let cmd = PageCommand::Navigate {
            url: "https://example.com".to_string(),
        };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("\"method\":\"Page.navigate\""));
        assert!(json.contains("https://example.com"));
    }

    #[test]
    fn test_unit_commands_omit_params() {
        let json = serde_json::to_string(&BrowserCommand::GetVersion).expect("serialize");
        assert_eq!(json, "{\"method\":\"Browser.getVersion\"}");

        let json = serde_json::to_string(&PageCommand::Enable).expect("serialize");
        assert_eq!(json, "{\"method\":\"Page.enable\"}");
    }

    #[test]
    fn test_attach_to_target_wire_shape() {
        let cmd = TargetCommand::AttachToTarget {
            target_id: TargetId::new("9A3F"),
            flatten: true,
        };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("\"method\":\"Target.attachToTarget\""));
        assert!(json.contains("\"targetId\":\"9A3F\""));
        assert!(json.contains("\"flatten\":true"));
    }

    #[test]
    fn test_evaluate_field_names() {
        let cmd = RuntimeCommand::Evaluate {
            expression: "document.title".to_string(),
            return_by_value: true,
            await_promise: true,
            user_gesture: true,
        };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("\"method\":\"Runtime.evaluate\""));
        assert!(json.contains("\"returnByValue\":true"));
        assert!(json.contains("\"awaitPromise\":true"));
        assert!(json.contains("\"userGesture\":true"));
    }

    #[test]
    fn test_extra_headers_serialize_as_object() {
        let mut headers = BTreeMap::new();
        headers.insert("Accept-Language".to_string(), "en-US,en;q=0.9".to_string());
        headers.insert("Sec-Fetch-Mode".to_string(), "navigate".to_string());

        let cmd = NetworkCommand::SetExtraHttpHeaders { headers };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("\"method\":\"Network.setExtraHTTPHeaders\""));
        assert!(json.contains("\"Accept-Language\":\"en-US,en;q=0.9\""));
        assert!(json.contains("\"Sec-Fetch-Mode\":\"navigate\""));
    }

    #[test]
    fn test_device_metrics_wire_shape() {
        let cmd = EmulationCommand::SetDeviceMetricsOverride {
            width: 1366,
            height: 768,
            device_scale_factor: 1.0,
            mobile: false,
        };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("\"method\":\"Emulation.setDeviceMetricsOverride\""));
        assert!(json.contains("\"width\":1366"));
        assert!(json.contains("\"height\":768"));
        assert!(json.contains("\"deviceScaleFactor\":1.0"));
        assert!(json.contains("\"mobile\":false"));
    }

    #[test]
    fn test_print_to_pdf_method_string() {
        let cmd = PageCommand::PrintToPdf(PdfParams::default());
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("\"method\":\"Page.printToPDF\""));
        assert!(json.contains("\"printBackground\":false"));
        assert!(json.contains("\"preferCSSPageSize\":false"));
    }

    #[test]
    fn test_pdf_params_defaults() {
        let params = PdfParams::default();
        assert_eq!(params.paper_width, 8.5);
        assert_eq!(params.paper_height, 11.0);
        assert_eq!(params.scale, 1.0);
        assert!(!params.landscape);
        assert!(!params.display_header_footer);
    }
}
