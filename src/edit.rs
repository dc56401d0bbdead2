//! In-place cell and header editing
//!
//! At most one edit is open per grid. Commits never touch the snapshot they
//! read from: they build new row or column vectors and return a new
//! `GridData` for the host.

use serde::Serialize;

use crate::model::{data::write_cell, CellPosition, CellValue, GridBounds, GridData};

/// Edit state machine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum EditSession {
    #[default]
    Idle,
    EditingCell {
        row: usize,
        col: usize,
        draft: String,
    },
    EditingHeader {
        col: usize,
        draft: String,
    },
}

/// What a session was editing when it closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Cell(CellPosition),
    Header(usize),
}

impl EditSession {
    /// Open a cell edit seeded with the current display value
    pub fn cell(data: &GridData, pos: CellPosition) -> Self {
        EditSession::EditingCell {
            row: pos.row,
            col: pos.col,
            draft: data.display(pos.row, pos.col),
        }
    }

    /// Open a cell edit whose draft is only the typed character
    pub fn cell_with_char(pos: CellPosition, ch: char) -> Self {
        EditSession::EditingCell {
            row: pos.row,
            col: pos.col,
            draft: ch.to_string(),
        }
    }

    pub fn header(data: &GridData, col: usize) -> Self {
        let draft = data
            .columns()
            .get(col)
            .map(|c| c.header.clone())
            .unwrap_or_default();
        EditSession::EditingHeader { col, draft }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }

    pub fn target(&self) -> Option<EditTarget> {
        match self {
            EditSession::Idle => None,
            EditSession::EditingCell { row, col, .. } => {
                Some(EditTarget::Cell(CellPosition::new(*row, *col)))
            }
            EditSession::EditingHeader { col, .. } => Some(EditTarget::Header(*col)),
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Idle => None,
            EditSession::EditingCell { draft, .. } | EditSession::EditingHeader { draft, .. } => {
                Some(draft)
            }
        }
    }

    fn draft_mut(&mut self) -> Option<&mut String> {
        match self {
            EditSession::Idle => None,
            EditSession::EditingCell { draft, .. } | EditSession::EditingHeader { draft, .. } => {
                Some(draft)
            }
        }
    }

    /// Replace the whole draft. Returns false when idle.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                *draft = text.into();
                true
            }
            None => false,
        }
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                draft.push(ch);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                draft.pop();
                true
            }
            None => false,
        }
    }

    /// Whether the session still refers to something inside `bounds`
    pub fn fits(&self, bounds: GridBounds) -> bool {
        match self.target() {
            None => true,
            Some(EditTarget::Cell(pos)) => bounds.contains(pos),
            Some(EditTarget::Header(col)) => col < bounds.cols,
        }
    }
}

/// Write a draft into a cell. `None` when the draft equals the current
/// display value or the cell is outside the grid.
pub fn commit_cell(data: &GridData, pos: CellPosition, draft: &str) -> Option<GridData> {
    if !data.contains(pos) {
        tracing::warn!(row = pos.row, col = pos.col, "commit target outside the grid");
        return None;
    }
    let current = data.get(pos.row, pos.col);
    let shown = current.map(CellValue::display).unwrap_or_default();
    if shown == draft {
        return None;
    }

    let value = CellValue::from_input(draft, current);
    let mut rows = data.rows_to_vec();
    write_cell(&mut rows, pos, value);
    Some(data.with_rows(rows))
}

/// Rename a column header. `None` when unchanged or out of range.
pub fn commit_header(data: &GridData, col: usize, draft: &str) -> Option<GridData> {
    let current = data.columns().get(col)?;
    if current.header == draft {
        return None;
    }
    let mut columns = data.columns_to_vec();
    columns[col].header = draft.to_string();
    Some(data.with_columns(columns))
}

/// Cell after `pos` in row-major order; `None` at the last cell
pub fn next_cell(pos: CellPosition, bounds: GridBounds) -> Option<CellPosition> {
    if pos.col + 1 < bounds.cols {
        Some(CellPosition::new(pos.row, pos.col + 1))
    } else if pos.row + 1 < bounds.rows {
        Some(CellPosition::new(pos.row + 1, 0))
    } else {
        None
    }
}
