//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Errors never
//! leave `update`: they are logged and become no-ops or `Cmd::Notice`.

mod clipboard;
mod data;
mod edit;
mod keyboard;
mod pointer;
mod scroll;
mod search;
mod selection;

use crate::commands::Cmd;
use crate::messages::{GridMsg, TimerId};
use crate::model::GridModel;

#[cfg(debug_assertions)]
use crate::messages::{PointerMsg, ScrollMsg};
#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use clipboard::update_clipboard;
pub use edit::update_edit;
pub use keyboard::update_key;
pub use pointer::update_pointer;
pub use scroll::update_scroll;
pub use search::update_search;
pub use selection::update_selection;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::SetData(grid) => data::set_data(model, grid),
        GridMsg::Resize { width, height } => data::resize(model, width, height),
        GridMsg::Scroll(m) => scroll::update_scroll(model, m),
        GridMsg::Pointer(m) => pointer::update_pointer(model, m),
        GridMsg::Key { key, modifiers } => keyboard::update_key(model, key, modifiers),
        GridMsg::Select(m) => selection::update_selection(model, m),
        GridMsg::Edit(m) => edit::update_edit(model, m),
        GridMsg::Clipboard(m) => clipboard::update_clipboard(model, m),
        GridMsg::Search(m) => search::update_search(model, m),
        GridMsg::OutsideInteraction => edit::commit_open(model),
        GridMsg::AnimationFrame => scroll::animation_frame(model),
        GridMsg::Timer { id, at } => match id {
            TimerId::ScrollSettle => scroll::settle(model, at),
            TimerId::DragFlush => pointer::drag_flush(model, at),
            TimerId::ProcessingDone => selection::processing_done(model),
        },
        GridMsg::PasteText(result) => clipboard::paste_text(model, result),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after selection and edit state and logs the diff.
/// High-frequency scroll and hover messages are not logged.
#[cfg(debug_assertions)]
fn update_traced(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    let is_noisy = matches!(
        &msg,
        GridMsg::Scroll(ScrollMsg::Scrolled { .. })
            | GridMsg::Pointer(PointerMsg::Enter { .. })
            | GridMsg::AnimationFrame
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = GridSnapshot::from_model(model);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = GridSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }
    debug_assert!(
        model.scroll.panes().in_sync(),
        "scroll panes out of sync after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Snapshots and clipboard text are summarized rather than dumped.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &GridMsg) -> String {
    match msg {
        GridMsg::SetData(d) => format!("SetData({}x{})", d.row_count(), d.column_count()),
        GridMsg::Resize { width, height } => format!("Resize({}, {})", width, height),
        GridMsg::Scroll(m) => format!("Scroll::{:?}", m),
        GridMsg::Pointer(m) => format!("Pointer::{:?}", m),
        GridMsg::Key { key, modifiers } => format!("Key({:?}, {:?})", key, modifiers),
        GridMsg::Select(m) => format!("Select::{:?}", m),
        GridMsg::Edit(m) => format!("Edit::{:?}", m),
        GridMsg::Clipboard(m) => format!("Clipboard::{:?}", m),
        GridMsg::Search(m) => format!("Search::{:?}", m),
        GridMsg::OutsideInteraction => "OutsideInteraction".to_string(),
        GridMsg::AnimationFrame => "AnimationFrame".to_string(),
        GridMsg::Timer { id, .. } => format!("Timer({:?})", id),
        GridMsg::PasteText(Ok(text)) => format!("PasteText({} bytes)", text.len()),
        GridMsg::PasteText(Err(e)) => format!("PasteText(Err({}))", e),
    }
}
