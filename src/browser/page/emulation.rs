//! User agent, header, and viewport overrides.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::protocol::{Command, EmulationCommand, NetworkCommand};

use super::Page;

// ============================================================================
// Page - Overrides
// ============================================================================

impl Page {
    /// Overrides the User-Agent header for all requests from this page.
    ///
    /// Requires network tracking, which is enabled when the page is
    /// created.
    pub async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        debug!(target_id = %self.inner.target_id, user_agent = %user_agent, "Setting user agent");

        let command = Command::Network(NetworkCommand::SetUserAgentOverride {
            user_agent: user_agent.to_string(),
        });
        self.send_command(command).await?;
        Ok(())
    }

    /// Attaches extra HTTP headers to every request from this page.
    pub async fn set_extra_http_headers(&self, headers: BTreeMap<String, String>) -> Result<()> {
        debug!(target_id = %self.inner.target_id, count = headers.len(), "Setting extra headers");

        let command = Command::Network(NetworkCommand::SetExtraHttpHeaders { headers });
        self.send_command(command).await?;
        Ok(())
    }

    /// Overrides the viewport size.
    ///
    /// # Arguments
    ///
    /// * `width` - Viewport width in CSS pixels
    /// * `height` - Viewport height in CSS pixels
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        debug!(target_id = %self.inner.target_id, width, height, "Setting viewport");

        let command = Command::Emulation(EmulationCommand::SetDeviceMetricsOverride {
            width,
            height,
            device_scale_factor: 1.0,
            mobile: false,
        });
        self.send_command(command).await?;
        Ok(())
    }
}
