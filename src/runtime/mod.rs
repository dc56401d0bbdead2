//! Runtime module - host integration
//!
//! This module contains the pieces a host needs to drive a grid:
//! - `host` - callbacks the engine invokes
//! - `driver` - message queue and command processing
//! - `clicks` - double-click detection from raw presses

pub mod clicks;
pub mod driver;
pub mod host;

pub use clicks::ClickTracker;
pub use driver::GridRuntime;
pub use host::{GridHost, HostEvent, RecordingHost};
