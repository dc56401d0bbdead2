//! Clipboard bridge
//!
//! Pure functions from a snapshot and a selection to clipboard text or to a
//! new snapshot. Reading and writing the actual clipboard is the host's job,
//! reached through `Cmd::ReadClipboard` / `Cmd::WriteClipboard` and a
//! `ClipboardBackend`.

mod system;
pub mod transform;
pub mod tsv;

pub use system::SystemClipboard;
pub use transform::TextTransform;

use crate::error::{ClipboardError, GridError, Result};
use crate::model::{data::write_cell, CellPosition, CellRect, CellValue, ColumnSpec, GridData};
use crate::selection::SelectionModel;

/// Copy the selection's bounding rectangle. Unselected cells inside the
/// rectangle copy as empty. `None` for an empty selection.
pub fn copy(data: &GridData, selection: &SelectionModel) -> Option<String> {
    let rect = selection.bounding_rect()?;
    let rows = (rect.min_row..=rect.max_row).map(|row| {
        (rect.min_col..=rect.max_col).map(move |col| {
            let pos = CellPosition::new(row, col);
            if selection.is_selected(pos) {
                data.display(row, col)
            } else {
                String::new()
            }
        })
    });
    Some(tsv::write_rows(rows))
}

/// Result of merging clipboard text into a snapshot
#[derive(Debug, Clone)]
pub struct PasteOutcome {
    pub data: GridData,
    /// Exactly the pasted cells
    pub rect: CellRect,
    pub columns_added: usize,
}

impl PasteOutcome {
    pub fn row_count(&self) -> usize {
        self.rect.height()
    }
}

/// Merge clipboard text into `data` with its top-left at `anchor`.
///
/// Rows and columns grow as needed; new columns are named by position.
/// Pasted strings are converted the way an edit commit converts a draft, so
/// copying a rectangle and pasting it back reproduces its values.
pub fn paste(data: &GridData, anchor: CellPosition, text: &str) -> Result<PasteOutcome> {
    let parsed = tsv::parse_rows(text).map_err(|e| {
        tracing::warn!("Failed to parse clipboard text: {}", e);
        GridError::MalformedPaste
    })?;
    let height = parsed.len();
    let width = parsed.iter().map(Vec::len).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Err(GridError::MalformedPaste);
    }

    let needed_rows = anchor.row + height;
    let needed_cols = anchor.col + width;

    let mut rows = data.rows_to_vec();
    if rows.len() < needed_rows {
        rows.resize_with(needed_rows, Vec::new);
    }

    let old_cols = data.column_count();
    let columns_added = needed_cols.saturating_sub(old_cols);

    for (r, fields) in parsed.iter().enumerate() {
        for (c, field) in fields.iter().enumerate() {
            let pos = CellPosition::new(anchor.row + r, anchor.col + c);
            let value = CellValue::from_input(field, data.get(pos.row, pos.col));
            write_cell(&mut rows, pos, value);
        }
    }

    let next = if columns_added > 0 {
        let mut columns = data.columns_to_vec();
        columns.extend((old_cols..needed_cols).map(ColumnSpec::positional));
        GridData::new(rows, columns)
    } else {
        data.with_rows(rows)
    };

    let rect = CellRect::from_corners(
        anchor,
        CellPosition::new(needed_rows - 1, needed_cols - 1),
    );
    tracing::debug!(
        rows = height,
        cols = width,
        columns_added,
        "pasted clipboard text"
    );

    Ok(PasteOutcome {
        data: next,
        rect,
        columns_added,
    })
}

/// Set every selected cell to the empty string. Rows and columns are never
/// removed. `None` when nothing changed.
pub fn delete(data: &GridData, selection: &SelectionModel) -> Option<GridData> {
    let blank = CellValue::text("");
    let targets: Vec<CellPosition> = selection
        .cells()
        .filter(|p| data.contains(*p) && data.get(p.row, p.col) != Some(&blank))
        .collect();
    if targets.is_empty() {
        return None;
    }
    let mut rows = data.rows_to_vec();
    for pos in targets {
        write_cell(&mut rows, pos, blank.clone());
    }
    Some(data.with_rows(rows))
}

/// Apply a transform to every selected text cell. Undefined cells are never
/// created; numbers and empties are left alone.
pub fn transform(
    data: &GridData,
    selection: &SelectionModel,
    transform: TextTransform,
) -> Option<GridData> {
    let changes: Vec<(CellPosition, String)> = selection
        .cells()
        .filter_map(|pos| {
            let text = data.get(pos.row, pos.col)?.as_text()?;
            let next = transform.apply(text);
            (next != text).then_some((pos, next))
        })
        .collect();
    if changes.is_empty() {
        return None;
    }
    let mut rows = data.rows_to_vec();
    for (pos, text) in changes {
        write_cell(&mut rows, pos, CellValue::Text(text));
    }
    Some(data.with_rows(rows))
}

/// Access to a system or in-memory clipboard
pub trait ClipboardBackend {
    fn get_text(&mut self) -> std::result::Result<String, ClipboardError>;
    fn set_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError>;
}

/// Process-local clipboard for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            denied: false,
        }
    }

    /// A clipboard that refuses every access
    pub fn denied() -> Self {
        Self {
            text: None,
            denied: true,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn get_text(&mut self) -> std::result::Result<String, ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Denied("memory clipboard is locked".into()));
        }
        self.text.clone().ok_or(ClipboardError::Empty)
    }

    fn set_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Denied("memory clipboard is locked".into()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}
