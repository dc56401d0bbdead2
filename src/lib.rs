//! sheetgrid - headless spreadsheet grid engine
//!
//! This crate provides the core types and logic for a virtualized, editable
//! grid implementing the Elm Architecture pattern. The host owns the data and
//! the pixels; the engine owns the window, scroll, selection and edit state.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod edit;
pub mod error;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod schedule;
pub mod scroll;
pub mod search;
pub mod selection;
pub mod tracing;
pub mod update;
pub mod viewport;

// Re-export commonly used types
pub use commands::{Cmd, Damage, Notice};
pub use config::GridConfig;
pub use error::{ClipboardError, GridError};
pub use messages::GridMsg;
pub use model::{CellPosition, CellValue, ColumnSpec, GridData, GridModel};
pub use runtime::{GridHost, GridRuntime};
pub use update::update;
