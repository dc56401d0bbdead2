//! Error types for the grid engine
//!
//! None of these ever escape `update()`: they are logged and turned into
//! no-ops or host notices.

use crate::model::CellPosition;

/// Recoverable failures inside the grid engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A selection/edit/scroll target outside the current bounds
    #[error("cell ({row}, {col}) is outside the grid")]
    InvalidIndex { row: usize, col: usize },

    /// Clipboard read/write was denied or returned nothing
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(#[from] ClipboardError),

    /// Clipboard text produced no rows or no columns
    #[error("clipboard text contains no cells")]
    MalformedPaste,

    /// A second edit session was requested while one was open
    #[error("an edit session is already active")]
    ConcurrentEditConflict,
}

impl GridError {
    pub fn invalid(pos: CellPosition) -> Self {
        Self::InvalidIndex {
            row: pos.row,
            col: pos.col,
        }
    }
}

/// Failure reported by a clipboard backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("access denied: {0}")]
    Denied(String),
    #[error("clipboard is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, GridError>;
