//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that the host performs after an update.

use std::sync::Arc;
use std::time::Duration;

use crate::messages::TimerId;
use crate::model::{ColumnSpec, GridData};
use crate::scroll::ScrollOffsets;
use crate::selection::SelectionSummary;

// ============================================================================
// Damage Tracking
// ============================================================================

/// What needs repainting after an update
#[derive(Debug, Clone, PartialEq)]
pub enum Damage {
    /// Nothing to repaint
    None,
    /// Repaint everything
    Full,
    /// Repaint only these areas
    Areas(Vec<DamageArea>),
}

/// Independently repaintable regions of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageArea {
    /// Windowed body cells of the main and frozen panes
    Body,
    /// Sticky column header band
    Headers,
    /// Selection highlight only
    Selection,
    /// Inline editor overlay
    Editor,
    /// Specific data rows (row indices are absolute)
    Rows(Vec<usize>),
}

impl Damage {
    pub fn body() -> Self {
        Damage::Areas(vec![DamageArea::Body])
    }

    pub fn rows(rows: Vec<usize>) -> Self {
        if rows.is_empty() {
            Damage::None
        } else {
            Damage::Areas(vec![DamageArea::Rows(rows)])
        }
    }

    /// Merge another damage into this one
    ///
    /// Full absorbs everything, None is the identity, areas are combined
    /// without duplicates and row lists are unioned.
    pub fn merge(&mut self, other: Damage) {
        match (&mut *self, other) {
            (Damage::None, other) => *self = other,
            (_, Damage::None) => {}
            (Damage::Full, _) => {}
            (this, Damage::Full) => *this = Damage::Full,
            (Damage::Areas(areas), Damage::Areas(other_areas)) => {
                for area in other_areas {
                    if let DamageArea::Rows(ref rows) = area {
                        if let Some(existing) = areas.iter_mut().find_map(|a| match a {
                            DamageArea::Rows(r) => Some(r),
                            _ => Option::None,
                        }) {
                            for &row in rows {
                                if !existing.contains(&row) {
                                    existing.push(row);
                                }
                            }
                            continue;
                        }
                    }
                    if !areas.contains(&area) {
                        areas.push(area);
                    }
                }
            }
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Damage::Full)
    }

    pub fn includes(&self, area: &DamageArea) -> bool {
        match self {
            Damage::None => false,
            Damage::Full => true,
            Damage::Areas(areas) => areas.contains(area),
        }
    }

    pub fn needs_redraw(&self) -> bool {
        match self {
            Damage::None => false,
            Damage::Full => true,
            Damage::Areas(areas) => !areas.is_empty(),
        }
    }
}

// ============================================================================
// Host-facing notices
// ============================================================================

/// Non-fatal conditions the host may surface to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Clipboard read or write was refused
    ClipboardUnavailable(String),
    /// Clipboard held no cells
    NothingToPaste,
    /// Find found no occurrence
    NoMatches,
    /// A selection-based action ran with nothing selected
    NothingSelected,
}

// ============================================================================
// Side-Effect Commands (returned from update)
// ============================================================================

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Repaint everything
    Redraw,
    /// Repaint specific areas
    RedrawAreas(Vec<DamageArea>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === Data callbacks ===
    /// New rows (and possibly columns) for the host. The engine has already
    /// adopted this snapshot.
    EmitDataChange(GridData),
    /// New column list after a header rename or paste growth
    EmitHeaderChange(Arc<Vec<ColumnSpec>>),
    /// Selection changed; the full set stays readable on the model
    EmitSelectionChange(SelectionSummary),

    // === Scheduling ===
    /// Call back with `GridMsg::AnimationFrame` on the next frame
    RequestAnimationFrame,
    /// Call back with `GridMsg::Timer { id, .. }` after `after`
    ScheduleTimer { id: TimerId, after: Duration },

    // === Scrolling ===
    /// Move the interactive pane. The model already holds `offsets`.
    ScrollTo { offsets: ScrollOffsets, smooth: bool },

    // === Clipboard ===
    WriteClipboard(String),
    /// Read the clipboard and answer with `GridMsg::PasteText`
    ReadClipboard,

    /// Surface a non-fatal condition
    Notice(Notice),
}

impl Cmd {
    /// Create a batch of commands, flattening away empty entries
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        self.damage().needs_redraw()
    }

    /// Combined damage of this command
    pub fn damage(&self) -> Damage {
        match self {
            Cmd::None => Damage::None,
            Cmd::Redraw => Damage::Full,
            Cmd::RedrawAreas(areas) => {
                if areas.is_empty() {
                    Damage::None
                } else {
                    Damage::Areas(areas.clone())
                }
            }
            Cmd::Batch(cmds) => {
                let mut damage = Damage::None;
                for cmd in cmds {
                    damage.merge(cmd.damage());
                    if damage.is_full() {
                        break;
                    }
                }
                damage
            }
            // New snapshot: every visible cell may have changed
            Cmd::EmitDataChange(_) => Damage::Full,
            Cmd::EmitHeaderChange(_) => Damage::Areas(vec![DamageArea::Headers]),
            Cmd::EmitSelectionChange(_) => Damage::Areas(vec![DamageArea::Selection]),
            Cmd::ScrollTo { .. } => Damage::body(),
            // Callbacks arrive as messages and report their own damage
            Cmd::RequestAnimationFrame => Damage::None,
            Cmd::ScheduleTimer { .. } => Damage::None,
            Cmd::WriteClipboard(_) => Damage::None,
            Cmd::ReadClipboard => Damage::None,
            Cmd::Notice(_) => Damage::None,
        }
    }

    /// Repaint the windowed body
    pub fn redraw_body() -> Self {
        Cmd::RedrawAreas(vec![DamageArea::Body])
    }

    /// Repaint the inline editor
    pub fn redraw_editor() -> Self {
        Cmd::RedrawAreas(vec![DamageArea::Editor])
    }

    pub fn timer(id: TimerId, after: Duration) -> Self {
        Cmd::ScheduleTimer { id, after }
    }

    /// Iterate over this command and, for batches, every nested command
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }

    /// Convert Option<Cmd> with None to Cmd::None
    pub fn from_option(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
