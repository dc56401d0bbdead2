//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Messages whose
//! handling depends on time carry the `Instant` the host observed them at.

use std::time::Instant;

use crate::clipboard::TextTransform;
use crate::error::ClipboardError;
use crate::model::{CellPosition, GridData};
use crate::scroll::ScrollOffsets;
use crate::selection::SelectMode;

/// Direction for active-cell movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Keyboard modifiers held during an input event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl on Linux/Windows, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the grid reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Escape,
    F2,
    Backspace,
    Delete,
    Arrow(Direction),
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
}

/// What the pointer is over, as resolved by the host's hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Cell(CellPosition),
    /// Row-number gutter cell
    RowNumber(usize),
    ColumnHeader(usize),
    /// Top-left corner above the row numbers
    Corner,
    Outside,
}

/// Scroll messages from the main pane
#[derive(Debug, Clone)]
pub enum ScrollMsg {
    /// Raw offsets reported by the interactive pane
    Scrolled { offsets: ScrollOffsets, at: Instant },
    /// Bring a cell fully into view
    ScrollToCell {
        row: usize,
        col: usize,
        smooth: bool,
    },
}

/// Pointer messages
#[derive(Debug, Clone)]
pub enum PointerMsg {
    /// Primary button pressed
    Down {
        target: HitTarget,
        modifiers: Modifiers,
        at: Instant,
    },
    /// Pointer entered a new target; `primary_held` as reported by the host
    Enter {
        target: HitTarget,
        primary_held: bool,
        at: Instant,
    },
    /// Primary button released, anywhere
    Up { at: Instant },
    DoubleClick { target: HitTarget },
}

/// Direct selection requests from the host
#[derive(Debug, Clone)]
pub enum SelectMsg {
    Single(CellPosition),
    Toggle(CellPosition),
    Range { from: CellPosition, to: CellPosition },
    Row { row: usize, mode: SelectMode },
    Column { col: usize, mode: SelectMode },
    All,
    Clear,
}

/// Edit session messages
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Open an edit on a cell, seeded with its value
    BeginCell(CellPosition),
    /// Open a header rename
    RenameHeader(usize),
    /// Replace the draft (hosts with a native input)
    SetDraft(String),
    Char(char),
    Backspace,
    /// Commit and advance (Enter/Tab)
    Commit,
    /// Discard (Escape)
    Cancel,
}

/// Clipboard messages
#[derive(Debug, Clone)]
pub enum ClipboardMsg {
    Copy,
    Cut,
    /// Ask the host to read the clipboard; the text comes back as
    /// `GridMsg::PasteText`
    Paste,
    Delete,
    Transform(TextTransform),
}

/// Find/replace messages
#[derive(Debug, Clone)]
pub enum SearchMsg {
    FindNext {
        query: String,
        case_sensitive: bool,
    },
    ReplaceAll {
        query: String,
        replacement: String,
        case_sensitive: bool,
    },
}

/// Timers the grid schedules through `Cmd::ScheduleTimer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Clears `is_scrolling` once scroll events have gone quiet
    ScrollSettle,
    /// Applies a throttled drag hover
    DragFlush,
    /// Clears the processing flag
    ProcessingDone,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum GridMsg {
    /// Host supplies a new data snapshot
    SetData(GridData),
    /// Container measured (already debounced by the host)
    Resize { width: f32, height: f32 },
    Scroll(ScrollMsg),
    Pointer(PointerMsg),
    Key { key: Key, modifiers: Modifiers },
    Select(SelectMsg),
    Edit(EditMsg),
    Clipboard(ClipboardMsg),
    Search(SearchMsg),
    /// Focus left the grid
    OutsideInteraction,
    /// The frame requested by `Cmd::RequestAnimationFrame`
    AnimationFrame,
    Timer { id: TimerId, at: Instant },
    /// Host's answer to `Cmd::ReadClipboard`
    PasteText(Result<String, ClipboardError>),
}
