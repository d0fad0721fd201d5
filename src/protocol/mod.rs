//! DevTools protocol message types.
//!
//! This module defines the JSON message format exchanged with the
//! browser's DevTools debugging server.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Request` | Rust → Browser | Command request |
//! | `Response` | Browser → Rust | Command response |
//! | `Event` | Browser → Rust | Browser notification |
//!
//! # Command Naming
//!
//! Commands follow `Domain.methodName` format:
//!
//! - `Target.createTarget`
//! - `Page.navigate`
//! - `Runtime.evaluate`
//!
//! Commands addressed to an attached page carry a `sessionId` alongside
//! the method; browser-level commands omit it.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions by domain |
//! | `event` | Event message types |
//! | `request` | Request and Response types |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions organized by domain.
pub mod command;

/// Event message types.
pub mod event;

/// Request and Response message types.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    BrowserCommand, Command, EmulationCommand, NetworkCommand, PageCommand, PdfParams,
    RuntimeCommand, TargetCommand,
};
pub use event::{Event, ParsedEvent};
pub use request::{Request, Response, ResponseError};
