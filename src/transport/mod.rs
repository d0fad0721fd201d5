//! WebSocket transport layer.
//!
//! This module handles communication between this crate and the
//! browser's DevTools debugging server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Rust API       │                              │  Browser        │
//! │                 │         WebSocket            │  (DevTools      │
//! │  Connection     │◄────────────────────────────►│   server)       │
//! │  (client)       │      localhost:PORT          │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. Browser is launched with `--remote-debugging-port=0`
//! 2. `DevToolsEndpoint::discover` - Wait for the browser to publish
//!    its port and target path
//! 3. `Connection::connect` - Dial the WebSocket URL
//! 4. `Connection` - Send commands, receive responses/events
//! 5. `Connection::shutdown` - Close the connection
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `endpoint` | DevTools endpoint discovery |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

/// DevTools endpoint discovery.
pub mod endpoint;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, EventHandler};
pub use endpoint::DevToolsEndpoint;
